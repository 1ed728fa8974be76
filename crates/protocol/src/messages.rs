use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::INDEX_PATH;

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Asks the registry whether a label is free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSubdomainRequest {
    pub subdomain: String,
}

/// Registers (or updates) a label and stores its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSubdomainRequest {
    pub subdomain: String,
    pub user_id: String,
    pub html_content: String,
    #[serde(default = "default_index_path")]
    pub path: String,
    #[serde(default = "default_true")]
    pub invalidate_cache: bool,
}

impl RegisterSubdomainRequest {
    /// Builds a request storing `html_content` as the label's `index.html`.
    pub fn index_page(subdomain: &str, user_id: &str, html_content: String) -> Self {
        Self {
            subdomain: subdomain.to_string(),
            user_id: user_id.to_string(),
            html_content,
            path: INDEX_PATH.to_string(),
            invalidate_cache: true,
        }
    }
}

/// One file to obtain a presigned upload target for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSpec {
    pub path: String,
    pub content_type: String,
}

/// Requests presigned upload URLs for a batch of files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsRequest {
    pub subdomain: String,
    pub user_id: String,
    pub files: Vec<FileSpec>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Availability answer.
///
/// `available` is optional on the wire: only an explicit `false` means taken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSubdomainResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckSubdomainResponse {
    /// Returns `false` only when the registry explicitly says so.
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }
}

/// Presigned upload targets keyed by file path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsResponse {
    #[serde(default)]
    pub upload_urls: HashMap<String, String>,
}

/// One label registered by a user.
///
/// `created_at` is Unix seconds; this payload keeps the registry's snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subdomain {
    pub subdomain: String,
    pub url: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Labels owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSubdomainsResponse {
    #[serde(default)]
    pub subdomains: Vec<Subdomain>,
}

/// Error body returned by the registry on non-2xx responses.
///
/// The registry uses `message` for most failures and `error` for input
/// validation, sometimes both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable text, preferring `message` over `error`.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.is_empty())
    }
}

fn default_index_path() -> String {
    INDEX_PATH.to_string()
}

fn default_true() -> bool {
    true
}
