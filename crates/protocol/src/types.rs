use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Deploy action input as sent by the editor.
///
/// Assets map a file name to a `data:` URL (or bare base64).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployGameRequest {
    #[serde(default)]
    pub game_code: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_subdomain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<HashMap<String, String>>,
}

/// Deploy action output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployGameResponse {
    pub success: bool,
    /// Public URL, empty when the deploy failed.
    pub deployment_url: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
}

/// Reachability of a freshly deployed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Success,
    Pending,
    Failed,
}

/// Answer of a standalone verification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyDeploymentResponse {
    pub status: VerificationStatus,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_request_optional_fields() {
        let req: DeployGameRequest =
            serde_json::from_str(r#"{"gameCode":"new Phaser.Game({})","projectName":"Space Game"}"#)
                .unwrap();
        assert_eq!(req.project_name, "Space Game");
        assert!(req.username.is_none());
        assert!(req.custom_subdomain.is_none());
        assert!(req.assets.is_none());
    }

    #[test]
    fn deploy_response_skips_missing_id() {
        let resp = DeployGameResponse {
            success: false,
            deployment_url: String::new(),
            message: "Method not allowed".into(),
            deployment_id: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"deploymentUrl\":\"\""));
        assert!(!json.contains("deploymentId"));
    }

    #[test]
    fn verification_status_lowercase() {
        let resp = VerifyDeploymentResponse {
            status: VerificationStatus::Pending,
            message: "still propagating".into(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "pending");
    }
}
