/// Domain under which every deployed game gets its own label.
pub const DEFAULT_BASE_DOMAIN: &str = "app.worldbuilder.space";

/// Object key the packaged page is registered under.
pub const INDEX_PATH: &str = "index.html";

/// Key prefix for uploaded game assets.
pub const ASSETS_PREFIX: &str = "assets/";

/// Owner identifier sent when the user did not supply one.
pub const DEFAULT_OWNER: &str = "anonymous";

/// Phaser build loaded by every packaged page.
pub const PHASER_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/phaser@3.55.2/dist/phaser.min.js";

/// Path segment of the registration endpoint.
pub const REGISTER_SEGMENT: &str = "register-subdomain";

/// Path segment of the availability endpoint.
pub const CHECK_SEGMENT: &str = "check-subdomain";

/// Path segment of the presigned upload URL endpoint.
pub const UPLOAD_URLS_SEGMENT: &str = "generate-upload-urls";

/// Path segment of the per-user label listing endpoint.
pub const USER_SUBDOMAINS_SEGMENT: &str = "user-subdomains";

/// Shortest label the registry accepts.
pub const LABEL_MIN_LEN: usize = 3;

/// Longest label the registry accepts (DNS label limit).
pub const LABEL_MAX_LEN: usize = 63;
