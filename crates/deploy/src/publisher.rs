//! Page registration and asset upload.
//!
//! Registration is the only fatal step: once the page is registered it is
//! live, and assets are uploaded best-effort. A missing asset degrades the
//! game, it does not unpublish it.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use worldbuilder_protocol::messages::{FileSpec, RegisterSubdomainRequest, UploadUrlsRequest};

use crate::assets::{asset_key, content_type_for, validate_asset_name};
use crate::backend::SiteBackend;
use crate::error::DeployError;
use crate::label::Label;
use crate::types::PublishReport;

/// Registers `html` as the label's index page, then uploads `assets`.
///
/// Returns `DeployError::Remote` only when registration fails; in that case
/// no asset upload is attempted. Registration is never retried.
pub async fn publish(
    backend: &dyn SiteBackend,
    label: &Label,
    owner: &str,
    html: String,
    assets: &BTreeMap<String, Vec<u8>>,
) -> Result<PublishReport, DeployError> {
    let req = RegisterSubdomainRequest::index_page(label.as_str(), owner, html);
    backend
        .register(&req)
        .await
        .map_err(|e| DeployError::Remote(e.remote_text()))?;

    info!(label = %label, owner, "page registered");

    let mut report = PublishReport::default();
    if assets.is_empty() {
        return Ok(report);
    }

    let mut valid = Vec::with_capacity(assets.len());
    for (name, data) in assets {
        match validate_asset_name(name) {
            Ok(()) => valid.push((name, data)),
            Err(e) => {
                warn!(asset = %name, error = %e, "skipping asset");
                report.assets_failed.push(name.clone());
            }
        }
    }
    if valid.is_empty() {
        return Ok(report);
    }

    let urls_req = UploadUrlsRequest {
        subdomain: label.as_str().to_string(),
        user_id: owner.to_string(),
        files: valid
            .iter()
            .map(|(name, _)| FileSpec {
                path: asset_key(name),
                content_type: content_type_for(name).to_string(),
            })
            .collect(),
    };

    let urls = match backend.upload_urls(&urls_req).await {
        Ok(urls) => urls,
        Err(e) => {
            warn!(label = %label, error = %e, "failed to generate upload URLs");
            report
                .assets_failed
                .extend(valid.iter().map(|(name, _)| (*name).clone()));
            return Ok(report);
        }
    };

    // One upload at a time.
    for (name, data) in valid {
        let key = asset_key(name);
        let Some(url) = urls.get(&key) else {
            warn!(asset = %name, "no upload URL returned");
            report.assets_failed.push(name.clone());
            continue;
        };

        match backend
            .put_asset(url, content_type_for(name), data.clone())
            .await
        {
            Ok(()) => {
                debug!(asset = %name, bytes = data.len(), "asset uploaded");
                report.assets_uploaded += 1;
            }
            Err(e) => {
                warn!(asset = %name, error = %e, "asset upload failed");
                report.assets_failed.push(name.clone());
            }
        }
    }

    info!(
        label = %label,
        uploaded = report.assets_uploaded,
        failed = report.assets_failed.len(),
        "assets processed"
    );

    Ok(report)
}
