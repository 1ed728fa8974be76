//! Game deploy flow: label, availability, packaging, publishing, verification.
//!
//! This crate implements the **business logic** for publishing a generated
//! game to its own subdomain. It has no UI dependencies; callers provide a
//! `SiteBackend` (the HTTP client in production, mocks in tests).
//!
//! # Pipeline
//!
//! 1. **Resolve**: turn the project name or custom label into a valid label
//! 2. **Check**: ask the registry whether the label is free (fail-open)
//! 3. **Package**: embed the game source in a static HTML page
//! 4. **Publish**: register the page, then upload assets best-effort
//! 5. **Verify**: request the public URL a bounded number of times

pub mod action;
pub mod assets;
pub mod availability;
pub mod backend;
pub mod deploy;
pub mod error;
pub mod label;
pub mod publisher;
pub mod scanner;
pub mod site;
pub mod types;
pub mod verifier;

// Re-export primary types for convenience.
pub use action::{deploy_game, into_deployment_request};
pub use assets::{content_type_for, decode_data_url, validate_asset_name};
pub use availability::check_available;
pub use backend::{BackendFuture, SiteBackend};
pub use deploy::{DeployOptions, DeployOrchestrator};
pub use error::DeployError;
pub use label::{Label, resolve};
pub use publisher::publish;
pub use scanner::scan_assets;
pub use site::package;
pub use types::{
    Availability, DeployEvent, DeployStage, DeploymentRequest, DeploymentResult, PublishReport,
    VerificationOutcome,
};
pub use verifier::{VerifyPolicy, verify, verify_deployment};
