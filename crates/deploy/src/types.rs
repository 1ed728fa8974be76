//! Data types for the deploy flow.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use worldbuilder_protocol::types::{DeployGameResponse, VerificationStatus};

/// Everything needed for one deploy attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentRequest {
    pub game_source: String,
    pub project_name: String,
    /// User-chosen label; wins over the one derived from the project name.
    pub custom_label: Option<String>,
    /// Owner identifier sent to the registry.
    pub owner: Option<String>,
    /// Asset bytes keyed by file name.
    pub assets: BTreeMap<String, Vec<u8>>,
}

/// Registry answer about a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    pub message: String,
    /// `false` when the answer is the fail-open default rather than the registry's.
    pub verified: bool,
}

/// What the publisher managed to store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub assets_uploaded: usize,
    /// Names of assets that did not make it; the page is live regardless.
    pub assets_failed: Vec<String>,
}

/// Result of the post-deploy reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub reached: bool,
    pub attempts_used: u32,
}

impl VerificationOutcome {
    /// Maps the outcome onto the wire status. Unreached means still propagating.
    pub fn status(&self) -> VerificationStatus {
        if self.reached {
            VerificationStatus::Success
        } else {
            VerificationStatus::Pending
        }
    }

    /// User-facing description.
    pub fn message(&self) -> &'static str {
        if self.reached {
            "Deployment verified and accessible"
        } else {
            "Deployment is still propagating. Try again in a few moments."
        }
    }
}

/// Final result of one deploy attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub succeeded: bool,
    pub url: Option<String>,
    pub message: String,
    pub label: Option<String>,
    pub verification: Option<VerificationOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assets_failed: Vec<String>,
    pub deployed_at: DateTime<Utc>,
}

impl DeploymentResult {
    pub(crate) fn failed(message: impl Into<String>, label: Option<String>) -> Self {
        Self {
            succeeded: false,
            url: None,
            message: message.into(),
            label,
            verification: None,
            assets_failed: Vec::new(),
            deployed_at: Utc::now(),
        }
    }

    /// `<iframe>` snippet for embedding the game elsewhere.
    pub fn embed_code(&self) -> Option<String> {
        let url = self.url.as_deref().filter(|_| self.succeeded)?;
        Some(format!(
            "<iframe \n  src=\"{url}\" \n  width=\"800\" \n  height=\"600\" \
             \n  allowfullscreen>\n</iframe>"
        ))
    }
}

impl From<&DeploymentResult> for DeployGameResponse {
    fn from(result: &DeploymentResult) -> Self {
        DeployGameResponse {
            success: result.succeeded,
            deployment_url: result.url.clone().unwrap_or_default(),
            message: result.message.clone(),
            deployment_id: result.label.clone().filter(|_| result.succeeded),
        }
    }
}

/// Stage of the deploy state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage {
    Idle,
    Resolving,
    Checking,
    Packaging,
    Publishing,
    Verifying,
    Done { succeeded: bool },
}

/// Event emitted while a deploy runs.
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// The workflow entered a new stage.
    Stage(DeployStage),
    /// An asset could not be uploaded; the deploy continues.
    AssetFailed { name: String },
}
