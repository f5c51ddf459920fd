//! API Response types
//!
//! Every backend endpoint answers with the same envelope:
//!
//! ```json
//! {
//!     "success": true,
//!     "message": "Orders fetched",
//!     "orders": [ ... ]
//! }
//! ```
//!
//! Only the key that carries the payload differs per endpoint (`tables`,
//! `orders`, `order`, `menus`, `categories`, `data`, `token`). Each of those
//! gets one payload struct below, flattened into [`ApiResponse`], so a single
//! schema describes the whole contract.

use serde::{Deserialize, Serialize};

use crate::models::{Category, MenuItem, RawOrder, RawTable};

/// Unified backend response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Logical outcome; `false` means the request reached the backend but was refused
    #[serde(default)]
    pub success: bool,
    /// Human-readable message, always present on failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Endpoint-specific payload
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(payload: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload,
        }
    }

    /// Message to surface when the backend refused the request
    pub fn failure_message(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl<T: Default> ApiResponse<T> {
    /// Create a failure response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: T::default(),
        }
    }
}

/// Payload of endpoints that only report `{success, message}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoPayload {}

/// `POST /api/auth/verify-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Endpoints that answer under a `data` key (verify, profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPayload<T> {
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> Default for DataPayload<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

/// `GET /api/tables`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablesPayload {
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

/// `GET /api/category`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesPayload {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// `GET /api/menu`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenusPayload {
    #[serde(default)]
    pub menus: Vec<MenuItem>,
}

/// `POST /api/orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<RawOrder>,
}

/// `GET /api/orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersPayload {
    #[serde(default)]
    pub orders: Vec<RawOrder>,
}
