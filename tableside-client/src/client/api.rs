//! Backend API client
//!
//! One method per endpoint of the restaurant backend. Every call is a single
//! request: no retry, no caching. Envelopes with `success: false` become
//! [`ClientError::Api`]; transport errors propagate unchanged.

use serde::de::DeserializeOwned;

use shared::client::{
    MenuQuery, OrderQuery, ProfileQuery, SendOtpRequest, TableQuery, TokenQuery, VerifyOtpRequest,
};
use shared::models::{
    Category, Employee, EmployeeUpdate, MenuItem, OrderCreate, OrderUpdate, RawOrder, RawTable,
    TableStatus, TableStatusUpdate,
};
use shared::response::{
    ApiResponse, CategoriesPayload, DataPayload, MenusPayload, NoPayload, OrderPayload,
    OrdersPayload, TablesPayload, TokenPayload,
};

use super::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Unwrap an envelope, turning `success: false` into a logical error
trait IntoPayload<T> {
    fn into_payload(self, fallback: &str) -> ClientResult<T>;
}

impl<T> IntoPayload<T> for ApiResponse<T> {
    fn into_payload(self, fallback: &str) -> ClientResult<T> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ClientError::Api(self.failure_message(fallback)))
        }
    }
}

/// Typed client for the restaurant backend
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    http: C,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    async fn get_payload<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        fallback: &str,
    ) -> ClientResult<T> {
        self.http
            .get::<ApiResponse<T>>(path, Some(token))
            .await?
            .into_payload(fallback)
    }

    // ========== Auth API ==========

    /// Ask the backend to email a login code
    pub async fn send_otp(&self, email: &str) -> ClientResult<Option<String>> {
        let req = SendOtpRequest {
            email: email.to_string(),
        };
        let resp: ApiResponse<NoPayload> = self.http.post("/api/auth/send-otp", &req, None).await?;
        let message = resp.message.clone();
        resp.into_payload("Failed to send verification code")?;
        Ok(message)
    }

    /// Exchange a login code for a bearer token
    pub async fn verify_otp(&self, email: &str, otp: &str) -> ClientResult<String> {
        let req = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        let resp: ApiResponse<TokenPayload> =
            self.http.post("/api/auth/verify-otp", &req, None).await?;
        resp.into_payload("Invalid verification code")?
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::InvalidResponse("Missing token".to_string()))
    }

    /// Resolve the employee behind a token
    pub async fn verify_token(&self, token: &str) -> ClientResult<Employee> {
        let resp: ApiResponse<DataPayload<Employee>> = self
            .http
            .get_with_query("/api/auth/verify", &TokenQuery { token }, None)
            .await?;
        resp.into_payload("Session expired")?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing employee data".to_string()))
    }

    pub async fn get_employee_profile(&self, email: &str, token: &str) -> ClientResult<Employee> {
        let resp: ApiResponse<DataPayload<Employee>> = self
            .http
            .get_with_query("/api/auth/profile", &ProfileQuery { email }, Some(token))
            .await?;
        resp.into_payload("Failed to load profile")?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing profile data".to_string()))
    }

    pub async fn update_employee_profile(
        &self,
        update: &EmployeeUpdate,
        token: &str,
    ) -> ClientResult<()> {
        let resp: ApiResponse<NoPayload> =
            self.http.put("/api/auth/profile", update, Some(token)).await?;
        resp.into_payload("Failed to update profile").map(|_| ())
    }

    // ========== Tables API ==========

    pub async fn list_tables(&self, token: &str) -> ClientResult<Vec<RawTable>> {
        self.get_payload::<TablesPayload>("/api/tables", token, "Failed to load tables")
            .await
            .map(|p| p.tables)
    }

    pub async fn list_tables_by_status(
        &self,
        status: TableStatus,
        token: &str,
    ) -> ClientResult<Vec<RawTable>> {
        let query = TableQuery {
            status: Some(status),
        };
        let resp: ApiResponse<TablesPayload> = self
            .http
            .get_with_query("/api/tables", &query, Some(token))
            .await?;
        resp.into_payload("Failed to load tables").map(|p| p.tables)
    }

    pub async fn update_table_status(
        &self,
        table_id: &str,
        status: TableStatus,
        token: &str,
    ) -> ClientResult<()> {
        let path = format!("/api/tables/{}/status", table_id);
        let resp: ApiResponse<NoPayload> = self
            .http
            .put(&path, &TableStatusUpdate { status }, Some(token))
            .await?;
        resp.into_payload("Failed to update table status").map(|_| ())
    }

    // ========== Menu API ==========

    pub async fn list_categories(&self, token: &str) -> ClientResult<Vec<Category>> {
        self.get_payload::<CategoriesPayload>("/api/category", token, "Failed to load categories")
            .await
            .map(|p| p.categories)
    }

    pub async fn list_menu(&self, query: &MenuQuery, token: &str) -> ClientResult<Vec<MenuItem>> {
        let resp: ApiResponse<MenusPayload> = self
            .http
            .get_with_query("/api/menu", query, Some(token))
            .await?;
        resp.into_payload("Failed to load menu items").map(|p| p.menus)
    }

    // ========== Orders API ==========

    /// Submit a new order; the backend assigns id and order number
    pub async fn create_order(&self, order: &OrderCreate, token: &str) -> ClientResult<RawOrder> {
        let resp: ApiResponse<OrderPayload> =
            self.http.post("/api/orders", order, Some(token)).await?;
        resp.into_payload("Failed to create order")?
            .order
            .ok_or_else(|| ClientError::InvalidResponse("Missing order data".to_string()))
    }

    /// Replace an order (status included)
    pub async fn update_order(&self, order: &OrderUpdate, token: &str) -> ClientResult<()> {
        let resp: ApiResponse<NoPayload> = self.http.put("/api/orders", order, Some(token)).await?;
        resp.into_payload("Failed to update order").map(|_| ())
    }

    pub async fn list_orders(&self, query: &OrderQuery, token: &str) -> ClientResult<Vec<RawOrder>> {
        let resp: ApiResponse<OrdersPayload> = self
            .http
            .get_with_query("/api/orders", query, Some(token))
            .await?;
        resp.into_payload("Failed to fetch orders").map(|p| p.orders)
    }
}
