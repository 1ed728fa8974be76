//! Deploy error types.

/// Errors produced during deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required parameters: gameCode and projectName")]
    MissingParameters,

    #[error("Invalid subdomain '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    #[error("{0}")]
    Unavailable(String),

    #[error("Failed to register subdomain: {0}")]
    Remote(String),

    #[error("invalid asset: {0}")]
    Asset(String),

    #[error("site API error: {0}")]
    SiteApi(#[from] worldbuilder_site_api::Error),
}

impl DeployError {
    /// Text of a failed remote call, without local decoration.
    pub fn remote_text(&self) -> String {
        match self {
            DeployError::SiteApi(e) => e.remote_message(),
            DeployError::Remote(msg) | DeployError::Unavailable(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
