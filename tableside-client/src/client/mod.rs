//! Client module - transport and typed backend API.
//!
//! `HttpClient` is the transport seam: `NetworkHttpClient` for the real
//! backend, `OneshotHttpClient` for an in-process axum router.

mod api;
pub mod http;
pub mod http_oneshot;

// Re-export main types
pub use api::ApiClient;
pub use http::{HttpClient, NetworkHttpClient};
pub use http_oneshot::OneshotHttpClient;
