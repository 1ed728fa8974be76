//! Asset naming, content types and data URL decoding.

use std::path::{Component, Path};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use worldbuilder_protocol::constants::ASSETS_PREFIX;

use crate::error::DeployError;

/// Content type sent with an asset upload, from the text after the last dot.
///
/// A dot-only name such as `.png` still counts as a `png`.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("html") => "text/html",
        Some("css") => "text/css",
        _ => "application/octet-stream",
    }
}

/// Object key an asset is stored under.
pub fn asset_key(name: &str) -> String {
    format!("{ASSETS_PREFIX}{name}")
}

/// Rejects names that would escape the assets prefix.
pub fn validate_asset_name(name: &str) -> Result<(), DeployError> {
    if name.is_empty() {
        return Err(DeployError::Asset("empty asset name".into()));
    }

    let path = Path::new(name);
    if path.is_absolute() || name.starts_with('/') || name.starts_with('\\') {
        return Err(DeployError::Asset(format!(
            "absolute path not allowed: {name}"
        )));
    }

    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(DeployError::Asset(format!(
                    "parent directory traversal not allowed: {name}"
                )));
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(DeployError::Asset(format!(
                    "absolute path not allowed: {name}"
                )));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

/// Decodes an editor asset: a `data:` URL or bare base64.
///
/// `data:` URLs without `;base64` carry their payload as plain text.
pub fn decode_data_url(value: &str) -> Result<Vec<u8>, DeployError> {
    let value = value.trim();

    let Some(rest) = value.strip_prefix("data:") else {
        return decode_base64(value);
    };

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DeployError::Asset("data URL without payload".into()))?;

    if header.ends_with(";base64") {
        decode_base64(payload)
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

fn decode_base64(payload: &str) -> Result<Vec<u8>, DeployError> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| DeployError::Asset(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_table() {
        assert_eq!(content_type_for("ship.png"), "image/png");
        assert_eq!(content_type_for("bg.JPG"), "image/jpeg");
        assert_eq!(content_type_for("bg.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("anim.gif"), "image/gif");
        assert_eq!(content_type_for("logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("theme.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("hit.wav"), "audio/wav");
        assert_eq!(content_type_for("loop.ogg"), "audio/ogg");
        assert_eq!(content_type_for("lib.js"), "application/javascript");
        assert_eq!(content_type_for("level.json"), "application/json");
        assert_eq!(content_type_for("credits.html"), "text/html");
        assert_eq!(content_type_for("ui.css"), "text/css");
        assert_eq!(content_type_for("atlas.webp"), "application/octet-stream");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }

    #[test]
    fn dot_only_names_keep_their_type() {
        assert_eq!(content_type_for(".png"), "image/png");
        assert_eq!(content_type_for("sprites/.OGG"), "audio/ogg");
        assert_eq!(content_type_for("ship."), "application/octet-stream");
    }

    #[test]
    fn asset_keys_are_prefixed() {
        assert_eq!(asset_key("sprites/ship.png"), "assets/sprites/ship.png");
    }

    #[test]
    fn validate_rejects_escapes() {
        assert!(validate_asset_name("").is_err());
        assert!(validate_asset_name("../secret.png").is_err());
        assert!(validate_asset_name("a/../../b.png").is_err());
        assert!(validate_asset_name("/etc/passwd").is_err());
        assert!(validate_asset_name("sprites/ship.png").is_ok());
        assert!(validate_asset_name("./ship.png").is_ok());
    }

    #[test]
    fn decodes_base64_data_url() {
        let bytes = decode_data_url("data:image/png;base64,UE5HREFUQQ==").unwrap();
        assert_eq!(bytes, b"PNGDATA");
    }

    #[test]
    fn decodes_bare_base64() {
        assert_eq!(decode_data_url("UE5HREFUQQ==").unwrap(), b"PNGDATA");
    }

    #[test]
    fn plain_data_url_payload() {
        assert_eq!(
            decode_data_url("data:text/plain,hello").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_data_url("data:image/png;base64").is_err());
        assert!(decode_data_url("data:image/png;base64,@@@").is_err());
    }
}
