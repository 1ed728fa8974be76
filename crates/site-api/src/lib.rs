//! Client for the worldbuilder subdomain registration API.
//!
//! The registration service is a small set of JSON endpoints
//! (check, register, presigned upload URLs) plus plain HTTP against
//! the presigned targets and the published site.

pub mod client;
pub mod endpoints;

pub use client::{Client, ClientConfig, Error};
pub use endpoints::Endpoints;
