// tableside-client/src/client/http_oneshot.rs
// Oneshot HTTP client - in-memory transport

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::http::{HttpClient, bearer, error_from_status};
use crate::{ClientError, ClientResult};

/// Oneshot HTTP client (in-process calls)
///
/// Drives an axum `Router` through Tower's `oneshot`, with the same status
/// and envelope handling as the network client. Useful for demos and tests
/// that embed a backend in the same process.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use tableside_client::{ApiClient, OneshotHttpClient};
///
/// let router: Router = fake_backend();
/// let api = ApiClient::new(OneshotHttpClient::new(router));
/// let tables = api.list_tables("token").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - fully built router (`with_state` already applied)
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn build_request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Vec<u8>>,
        token: Option<&str>,
    ) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, bearer(token));
        }
        let body = match body {
            Some(bytes) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    /// Send the request and decode the response
    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(error_from_status(status, text));
        }

        serde_json::from_slice(&body_bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, None, token)?;
        self.execute(request).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let qs = serde_urlencoded::to_string(query)
            .map_err(|e| ClientError::Internal(format!("Failed to encode query: {}", e)))?;
        let uri = if qs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, qs)
        };
        let request = self.build_request(Method::GET, &uri, None, token)?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(Method::POST, path, Some(bytes), token)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let bytes = serde_json::to_vec(body)?;
        let request = self.build_request(Method::PUT, path, Some(bytes), token)?;
        self.execute(request).await
    }
}
