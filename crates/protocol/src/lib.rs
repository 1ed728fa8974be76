//! Wire types for the worldbuilder deploy flow.
//!
//! Covers two surfaces:
//! - the external subdomain registration API (check, register, upload URLs)
//! - the deploy action exposed to the editor UI

pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use messages::{
    ApiErrorBody, CheckSubdomainRequest, CheckSubdomainResponse, FileSpec,
    RegisterSubdomainRequest, Subdomain, UploadUrlsRequest, UploadUrlsResponse,
    UserSubdomainsResponse,
};
pub use types::{
    DeployGameRequest, DeployGameResponse, VerificationStatus, VerifyDeploymentResponse,
};
