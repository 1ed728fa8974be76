//! Registration API client.
//!
//! Async HTTP client using `reqwest` with an explicit per-request timeout.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Response;
use serde::Serialize;
use tracing::debug;
use worldbuilder_protocol::messages::{
    ApiErrorBody, CheckSubdomainRequest, CheckSubdomainResponse, RegisterSubdomainRequest,
    Subdomain, UploadUrlsRequest, UploadUrlsResponse, UserSubdomainsResponse,
};

use crate::endpoints::Endpoints;

/// Timeout applied to every request when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the registration client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Message suitable for showing to the user.
    ///
    /// API errors pass the remote text through untouched.
    pub fn remote_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registration endpoint (or API base) URL.
    pub register_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config with the default timeout.
    pub fn new(register_url: impl Into<String>) -> Self {
        Self {
            register_url: register_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Registration API client.
pub struct Client {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl Client {
    /// Creates a new client.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            endpoints: Endpoints::from_register_url(&config.register_url),
        })
    }

    /// Creates a client without registry routes, for checking published sites
    /// and uploading to presigned URLs.
    pub fn without_registry(timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoints: Endpoints::default(),
        })
    }

    /// Endpoints this client talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// POSTs a JSON body and returns the raw success body.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Vec<u8>, Error> {
        let resp = self.http.post(url).json(body).send().await?;
        success_body(resp).await
    }

    /// Asks the registry whether `subdomain` is free.
    pub async fn check_subdomain(&self, subdomain: &str) -> Result<CheckSubdomainResponse, Error> {
        let req = CheckSubdomainRequest {
            subdomain: subdomain.to_string(),
        };
        let body = self.post_json(&self.endpoints.check, &req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Registers the label and stores its page.
    pub async fn register_subdomain(&self, req: &RegisterSubdomainRequest) -> Result<(), Error> {
        let body = self.post_json(&self.endpoints.register, req).await?;
        debug!(
            subdomain = %req.subdomain,
            bytes = body.len(),
            "registration accepted"
        );
        Ok(())
    }

    /// Requests presigned upload targets, keyed by file path.
    pub async fn generate_upload_urls(
        &self,
        req: &UploadUrlsRequest,
    ) -> Result<HashMap<String, String>, Error> {
        let body = self.post_json(&self.endpoints.upload_urls, req).await?;
        let resp: UploadUrlsResponse = serde_json::from_slice(&body)?;
        Ok(resp.upload_urls)
    }

    /// Uploads raw bytes to a presigned URL.
    pub async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), Error> {
        let resp = self
            .http
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;
        success_body(resp).await?;
        Ok(())
    }

    /// Lists the labels registered by `user_id`.
    pub async fn user_subdomains(&self, user_id: &str) -> Result<Vec<Subdomain>, Error> {
        let resp = self
            .http
            .get(&self.endpoints.user_subdomains)
            .query(&[("userId", user_id)])
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let body = success_body(resp).await?;
        let resp: UserSubdomainsResponse = serde_json::from_slice(&body)?;
        Ok(resp.subdomains)
    }

    /// Sends an uncached HEAD request and returns the status code.
    pub async fn head(&self, url: &str) -> Result<u16, Error> {
        let resp = self
            .http
            .head(url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }
}

/// Returns the body of a 2xx response, or the remote error otherwise.
async fn success_body(resp: Response) -> Result<Vec<u8>, Error> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message: api_error_message(&body, status),
        });
    }
    Ok(resp.bytes().await?.to_vec())
}

/// Extracts the remote message from an error body.
fn api_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body)
        && let Some(text) = parsed.text()
    {
        return text.to_string();
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
