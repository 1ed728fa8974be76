//! Static page packaging.
//!
//! The deployed site is a single `index.html`: Phaser from the CDN, a
//! full-window canvas, a loading and an error overlay, and the game source
//! inlined verbatim in a script tag.

use worldbuilder_protocol::constants::PHASER_SCRIPT_URL;

const STYLE: &str = r#"    <style>
        body {
            margin: 0;
            padding: 0;
            overflow: hidden;
            background-color: #000;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
        }
        canvas {
            display: block;
            margin: 0 auto;
        }
        #loading, #error {
            position: absolute;
            top: 0;
            left: 0;
            width: 100%;
            height: 100%;
            flex-direction: column;
            justify-content: center;
            align-items: center;
            font-family: Arial, sans-serif;
        }
        #loading {
            display: flex;
            background-color: #000;
            color: white;
            font-size: 24px;
            z-index: 100;
        }
        #error {
            display: none;
            background-color: rgba(0,0,0,0.9);
            color: #ff5555;
            font-size: 18px;
            z-index: 200;
            padding: 20px;
            box-sizing: border-box;
            text-align: center;
        }
        .spinner {
            width: 40px;
            height: 40px;
            border: 4px solid rgba(255,255,255,0.3);
            border-radius: 50%;
            border-top: 4px solid white;
            animation: spin 1s linear infinite;
            margin-bottom: 20px;
        }
        @keyframes spin {
            0% { transform: rotate(0deg); }
            100% { transform: rotate(360deg); }
        }
        .retry-btn {
            margin-top: 20px;
            padding: 10px 20px;
            background-color: #4a7aff;
            color: white;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 16px;
        }
    </style>
"#;

const BODY_START: &str = r#"<body>
    <div id="loading">
        <div class="spinner"></div>
        Loading game...
    </div>
    <div id="error">
        <h2>Oops! Something went wrong</h2>
        <p id="error-message">There was an error loading the game.</p>
        <button class="retry-btn" onclick="window.location.reload()">Retry</button>
    </div>
    <script>
        window.onerror = function(message, source, lineno, colno, error) {
            document.getElementById('loading').style.display = 'none';
            document.getElementById('error').style.display = 'flex';
            document.getElementById('error-message').textContent =
                'Error: ' + message + ' (Line: ' + lineno + ')';
            return true;
        };
        window.onload = function() {
            document.getElementById('loading').style.display = 'none';
        };
    </script>
    <script>
"#;

const BODY_END: &str = r#"
    </script>
</body>
</html>
"#;

/// Builds the deployable HTML document for `game_source`.
///
/// Deterministic: the same inputs always yield the same bytes. The game
/// source is not sanitized; the page runs whatever script it is given.
pub fn package(game_source: &str, title: &str) -> String {
    let mut html = String::with_capacity(STYLE.len() + BODY_START.len() + game_source.len() + 512);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>");
    html.push_str(&escape_html(title));
    html.push_str("</title>\n");
    html.push_str("    <script src=\"");
    html.push_str(PHASER_SCRIPT_URL);
    html.push_str("\"></script>\n");
    html.push_str(STYLE);
    html.push_str("</head>\n");
    html.push_str(BODY_START);
    html.push_str(game_source);
    html.push_str(BODY_END);

    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
