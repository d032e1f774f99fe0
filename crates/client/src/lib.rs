//! HTTP client for the remote product/content API.
//!
//! [`ApiClient`] speaks the wire format; [`ProductApi`] is the seam the panel
//! views are written against so they can run over a fake in tests.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;

pub use api::ProductApi;
pub use client::{ApiClient, ApiClientConfig};
pub use error::ClientError;
