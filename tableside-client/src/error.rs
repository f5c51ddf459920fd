//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status without a backend envelope
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend answered `{success: false, message}`
    #[error("{0}")]
    Api(String),

    /// No bearer token available; checked before any request is sent
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Backend rejected the token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Validation error (client-side input checks)
    #[error("{0}")]
    Validation(String),

    /// Edited order references an item missing from the current catalog
    #[error("Menu item not found: {0}. Please refresh and try again.")]
    MenuItemNotFound(String),

    /// Table cannot take a new order
    #[error("{table} is {status} and cannot take a new order")]
    TableUnavailable { table: String, status: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Whether the failure happened on the way to or from the backend, as
    /// opposed to the backend refusing the request or a local check failing.
    pub fn is_transport(&self) -> bool {
        match self {
            ClientError::Http(_) | ClientError::Internal(_) | ClientError::InvalidResponse(_) => {
                true
            }
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Single-line message suitable for a status banner.
    ///
    /// Backend messages and local checks pass through verbatim; transport
    /// failures are prefixed so staff can tell a dead network from a refusal.
    pub fn user_message(&self) -> String {
        if self.is_transport() {
            format!("Network error: {self}")
        } else {
            self.to_string()
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        ClientError::Validation(message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_message() {
        assert_eq!(
            ClientError::AuthenticationRequired.user_message(),
            "Authentication required"
        );
    }

    #[test]
    fn test_api_message_is_verbatim() {
        let err = ClientError::Api("Table T5 already has an open order".into());
        assert!(!err.is_transport());
        assert_eq!(err.user_message(), "Table T5 already has an open order");
    }

    #[test]
    fn test_transport_classification() {
        let err = ClientError::Status {
            status: 503,
            body: "upstream down".into(),
        };
        assert!(err.is_transport());
        assert!(err.user_message().starts_with("Network error"));

        let err = ClientError::Status {
            status: 422,
            body: "bad".into(),
        };
        assert!(!err.is_transport());
    }

    #[test]
    fn test_menu_item_not_found_message() {
        let err = ClientError::MenuItemNotFound("m42".into());
        assert_eq!(
            err.user_message(),
            "Menu item not found: m42. Please refresh and try again."
        );
    }
}
