//! Client-related request types
//!
//! Bodies and query strings sent by the client. Response payloads live in
//! [`crate::response`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{MenuAvailability, OrderStatus};

/// Length of the login code sent by email
pub const OTP_LENGTH: usize = 6;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// `POST /api/auth/send-otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email(message = "Please enter a valid business email address"))]
    pub email: String,
}

/// `POST /api/auth/verify-otp`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email(message = "Please enter a valid business email address"))]
    pub email: String,
    #[validate(custom(function = "validate_otp"))]
    pub otp: String,
}

fn validate_otp(otp: &str) -> Result<(), ValidationError> {
    if otp.len() == OTP_LENGTH && otp.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("otp").with_message("Enter the 6-digit verification code".into()))
    }
}

/// `GET /api/auth/verify?token=`
#[derive(Debug, Clone, Serialize)]
pub struct TokenQuery<'a> {
    pub token: &'a str,
}

/// `GET /api/auth/profile?email=`
#[derive(Debug, Clone, Serialize)]
pub struct ProfileQuery<'a> {
    pub email: &'a str,
}

// =============================================================================
// Listing filters
// =============================================================================

/// Filter for `GET /api/tables`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TableQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<crate::models::TableStatus>,
}

/// Filter for `GET /api/menu`
#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuQuery {
    #[serde(rename = "categoryid", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MenuAvailability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl MenuQuery {
    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn available_only(mut self) -> Self {
        self.status = Some(MenuAvailability::Available);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }
}

/// Filter for `GET /api/orders`; dates go on the wire as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            status: None,
        }
    }

    pub fn by_status(status: OrderStatus) -> Self {
        Self {
            date: None,
            status: Some(status),
        }
    }

    pub fn by_date_and_status(date: NaiveDate, status: OrderStatus) -> Self {
        Self {
            date: Some(date),
            status: Some(status),
        }
    }
}
