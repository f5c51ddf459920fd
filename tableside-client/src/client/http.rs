// tableside-client/src/client/http.rs
// HTTP transport - network implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, ClientResult};

/// Error body the backend sends alongside non-2xx statuses
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    success: bool,
    message: String,
}

/// Map a non-success status and its body to a client error.
///
/// A `{success: false, message}` body is a logical refusal whatever the
/// status; anything else is classified by status code.
pub(crate) fn error_from_status(status: StatusCode, body: String) -> ClientError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body)
        && !envelope.success
    {
        return ClientError::Api(envelope.message);
    }
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(body),
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        _ => ClientError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// HTTP transport trait
///
/// One implementation talks to the network, the other drives an axum
/// `Router` in-process. Paths are absolute (`/api/orders`).
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T>;
    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T>;
}

/// Network HTTP client (reqwest)
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut req: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> ClientResult<T> {
        if let Some(token) = token {
            req = req.header(reqwest::header::AUTHORIZATION, bearer(token));
        }
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(error_from_status(status, text));
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path)), token).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path)).query(query), token)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body), token)
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(body), token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = NetworkHttpClient::new("http://localhost:5000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/orders"), "http://localhost:5000/api/orders");
        assert_eq!(client.url("api/tables"), "http://localhost:5000/api/tables");
    }

    #[test]
    fn test_error_envelope_wins_over_status() {
        let err = error_from_status(
            StatusCode::BAD_REQUEST,
            r#"{"success": false, "message": "Invalid OTP"}"#.into(),
        );
        assert!(matches!(err, ClientError::Api(ref m) if m == "Invalid OTP"));
    }

    #[test]
    fn test_plain_error_bodies() {
        assert!(matches!(
            error_from_status(StatusCode::UNAUTHORIZED, "nope".into()),
            ClientError::Unauthorized(_)
        ));
        let err = error_from_status(StatusCode::BAD_GATEWAY, "<html>".into());
        assert!(err.is_transport());
    }
}
