//! Deploy action surface.
//!
//! Adapts the editor's JSON request to a `DeploymentRequest` and the result
//! back to the wire response.

use std::collections::BTreeMap;

use tracing::warn;
use worldbuilder_protocol::types::{DeployGameRequest, DeployGameResponse};

use crate::assets::decode_data_url;
use crate::backend::SiteBackend;
use crate::deploy::{DeployOptions, DeployOrchestrator};
use crate::types::DeploymentRequest;

/// Converts an action request, decoding its data-URL assets.
///
/// Assets that fail to decode are dropped with a warning.
pub fn into_deployment_request(req: DeployGameRequest) -> DeploymentRequest {
    let mut assets = BTreeMap::new();
    for (name, data_url) in req.assets.unwrap_or_default() {
        match decode_data_url(&data_url) {
            Ok(bytes) => {
                assets.insert(name, bytes);
            }
            Err(e) => warn!(asset = %name, error = %e, "dropping undecodable asset"),
        }
    }

    DeploymentRequest {
        game_source: req.game_code,
        project_name: req.project_name,
        custom_label: req.custom_subdomain,
        owner: req.username,
        assets,
    }
}

/// Runs the deploy action end to end.
pub async fn deploy_game(
    orchestrator: &DeployOrchestrator,
    backend: &dyn SiteBackend,
    req: DeployGameRequest,
    options: &DeployOptions,
) -> DeployGameResponse {
    let request = into_deployment_request(req);
    let result = orchestrator.deploy(backend, request, options).await;
    DeployGameResponse::from(&result)
}
