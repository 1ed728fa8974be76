//! Backend trait for the registration service.
//!
//! `SiteBackend` is implemented for the HTTP client from
//! `worldbuilder-site-api`. Keeping the workflow behind a trait keeps it
//! testable with in-memory mocks.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use worldbuilder_protocol::messages::{
    CheckSubdomainResponse, RegisterSubdomainRequest, UploadUrlsRequest,
};
use worldbuilder_site_api::Client;

use crate::error::DeployError;

/// Boxed future returned by `SiteBackend` methods.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, DeployError>> + Send + 'a>>;

/// Remote operations the deploy flow depends on.
pub trait SiteBackend: Send + Sync {
    /// Asks whether a label is free.
    fn check<'a>(&'a self, subdomain: &'a str) -> BackendFuture<'a, CheckSubdomainResponse>;

    /// Registers the label and stores the page.
    fn register<'a>(&'a self, req: &'a RegisterSubdomainRequest) -> BackendFuture<'a, ()>;

    /// Requests presigned upload targets keyed by file path.
    fn upload_urls<'a>(
        &'a self,
        req: &'a UploadUrlsRequest,
    ) -> BackendFuture<'a, HashMap<String, String>>;

    /// Uploads one asset to a presigned target.
    fn put_asset<'a>(
        &'a self,
        url: &'a str,
        content_type: &'a str,
        data: Vec<u8>,
    ) -> BackendFuture<'a, ()>;

    /// Requests a public URL and returns its HTTP status.
    fn status<'a>(&'a self, url: &'a str) -> BackendFuture<'a, u16>;
}

impl SiteBackend for Client {
    fn check<'a>(&'a self, subdomain: &'a str) -> BackendFuture<'a, CheckSubdomainResponse> {
        Box::pin(async move { Ok(self.check_subdomain(subdomain).await?) })
    }

    fn register<'a>(&'a self, req: &'a RegisterSubdomainRequest) -> BackendFuture<'a, ()> {
        Box::pin(async move { Ok(self.register_subdomain(req).await?) })
    }

    fn upload_urls<'a>(
        &'a self,
        req: &'a UploadUrlsRequest,
    ) -> BackendFuture<'a, HashMap<String, String>> {
        Box::pin(async move { Ok(self.generate_upload_urls(req).await?) })
    }

    fn put_asset<'a>(
        &'a self,
        url: &'a str,
        content_type: &'a str,
        data: Vec<u8>,
    ) -> BackendFuture<'a, ()> {
        Box::pin(async move { Ok(self.put_object(url, content_type, data).await?) })
    }

    fn status<'a>(&'a self, url: &'a str) -> BackendFuture<'a, u16> {
        Box::pin(async move { Ok(self.head(url).await?) })
    }
}
