//! Deploy orchestrator.
//!
//! Runs one deploy attempt through
//! `Resolving → Checking → Packaging → Publishing → Verifying → Done`
//! and turns every outcome into a `DeploymentResult`.

use tokio::sync::mpsc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;
use worldbuilder_protocol::constants::{DEFAULT_BASE_DOMAIN, DEFAULT_OWNER};

use crate::availability::check_available;
use crate::backend::SiteBackend;
use crate::error::DeployError;
use crate::label::resolve;
use crate::publisher::publish;
use crate::site::package;
use crate::types::{DeployEvent, DeployStage, DeploymentRequest, DeploymentResult};
use crate::verifier::{VerifyPolicy, verify};

/// Per-deploy settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOptions {
    /// Domain the label is published under.
    pub base_domain: String,
    /// Owner used when the request carries none.
    pub default_owner: String,
    /// Ask the registry about the label before publishing.
    pub check_availability: bool,
    /// Retry budget after publishing; `None` skips verification.
    pub verify: Option<VerifyPolicy>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
            default_owner: DEFAULT_OWNER.to_string(),
            check_availability: true,
            verify: Some(VerifyPolicy::default()),
        }
    }
}

impl DeployOptions {
    /// Public URL of a label.
    pub fn public_url(&self, label: &str) -> String {
        format!("https://{label}.{}", self.base_domain)
    }
}

/// Runs deploy attempts and reports their stages.
pub struct DeployOrchestrator {
    events_tx: mpsc::Sender<DeployEvent>,
    events_rx: Option<mpsc::Receiver<DeployEvent>>,
}

impl Default for DeployOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeployOrchestrator {
    /// Creates a new orchestrator.
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<DeployEvent>> {
        self.events_rx.take()
    }

    /// Runs one deploy attempt.
    ///
    /// Never fails: validation, availability and registration problems come
    /// back as an unsuccessful `DeploymentResult`. Asset and verification
    /// problems leave the result successful.
    pub async fn deploy(
        &self,
        backend: &dyn SiteBackend,
        request: DeploymentRequest,
        options: &DeployOptions,
    ) -> DeploymentResult {
        let span = info_span!(
            "deploy",
            id = %Uuid::new_v4(),
            project = %request.project_name,
        );
        self.run(backend, request, options).instrument(span).await
    }

    async fn run(
        &self,
        backend: &dyn SiteBackend,
        request: DeploymentRequest,
        options: &DeployOptions,
    ) -> DeploymentResult {
        self.emit(DeployEvent::Stage(DeployStage::Idle));

        if request.game_source.trim().is_empty() || request.project_name.trim().is_empty() {
            return self.fail(DeployError::MissingParameters.to_string(), None);
        }

        // 1. Resolve
        self.emit(DeployEvent::Stage(DeployStage::Resolving));
        let label = match resolve(&request.project_name, request.custom_label.as_deref()) {
            Ok(label) => label,
            Err(e) => return self.fail(e.to_string(), None),
        };
        let owner = request
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(options.default_owner.as_str());

        // 2. Check
        if options.check_availability {
            self.emit(DeployEvent::Stage(DeployStage::Checking));
            let availability = check_available(backend, &label).await;
            if !availability.available {
                let err = DeployError::Unavailable(availability.message);
                return self.fail(err.to_string(), Some(label.into_string()));
            }
        }

        // 3. Package
        self.emit(DeployEvent::Stage(DeployStage::Packaging));
        let html = package(&request.game_source, &request.project_name);

        // 4. Publish
        self.emit(DeployEvent::Stage(DeployStage::Publishing));
        let report = match publish(backend, &label, owner, html, &request.assets).await {
            Ok(report) => report,
            Err(e) => return self.fail(e.to_string(), Some(label.into_string())),
        };
        for name in &report.assets_failed {
            self.emit(DeployEvent::AssetFailed { name: name.clone() });
        }

        let url = options.public_url(label.as_str());

        // 5. Verify
        let verification = match &options.verify {
            Some(policy) => {
                self.emit(DeployEvent::Stage(DeployStage::Verifying));
                Some(verify(backend, &url, policy).await)
            }
            None => None,
        };

        let mut message = match verification {
            Some(v) if !v.reached => {
                "Game deployed successfully, but the site is still propagating. \
                 Try again in a few moments."
                    .to_string()
            }
            _ => "Game deployed successfully".to_string(),
        };
        if !report.assets_failed.is_empty() {
            message.push_str(&format!(
                " ({} asset(s) could not be uploaded)",
                report.assets_failed.len()
            ));
        }

        info!(url = %url, assets = report.assets_uploaded, "deploy completed");
        self.emit(DeployEvent::Stage(DeployStage::Done { succeeded: true }));

        DeploymentResult {
            succeeded: true,
            url: Some(url),
            message,
            label: Some(label.into_string()),
            verification,
            assets_failed: report.assets_failed,
            deployed_at: chrono::Utc::now(),
        }
    }

    fn fail(&self, message: String, label: Option<String>) -> DeploymentResult {
        warn!(error = %message, "deploy failed");
        self.emit(DeployEvent::Stage(DeployStage::Done { succeeded: false }));
        DeploymentResult::failed(message, label)
    }

    /// Best-effort: a full or closed channel never stalls a deploy.
    fn emit(&self, event: DeployEvent) {
        let _ = self.events_tx.try_send(event);
    }
}
