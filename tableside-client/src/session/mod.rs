//! Staff session
//!
//! OTP login, token persistence across restarts and logout. A logged-in
//! session hands out the [`OrderStore`] the screens work against.

pub mod storage;

use std::sync::Arc;

use validator::Validate;

use shared::client::{SendOtpRequest, VerifyOtpRequest};
use shared::models::{Employee, EmployeeUpdate};

use crate::client::{ApiClient, HttpClient};
use crate::config::{ClientConfig, RetryPolicy};
use crate::orders::OrderStore;
use crate::{ClientError, ClientResult};

pub use storage::{SessionStorage, StoredSession};

/// Authenticated staff member
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub employee: Employee,
}

/// Login state for one device
pub struct SessionManager<C> {
    api: Arc<ApiClient<C>>,
    storage: SessionStorage,
    retry: RetryPolicy,
    session: Option<Session>,
}

impl<C: HttpClient> SessionManager<C> {
    pub fn new(api: Arc<ApiClient<C>>, config: &ClientConfig) -> Self {
        Self {
            api,
            storage: SessionStorage::new(config.data_dir.clone()),
            retry: config.update_retry,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    fn require_session(&self) -> ClientResult<&Session> {
        self.session.as_ref().ok_or(ClientError::AuthenticationRequired)
    }

    /// Email a login code; returns the backend's confirmation message
    pub async fn request_otp(&self, email: &str) -> ClientResult<Option<String>> {
        let email = email.trim();
        SendOtpRequest {
            email: email.to_string(),
        }
        .validate()?;

        let message = self.api.send_otp(email).await?;
        tracing::info!(%email, "Verification code requested");
        Ok(message)
    }

    /// Exchange a login code for a session and persist its token
    pub async fn verify_otp(&mut self, email: &str, otp: &str) -> ClientResult<&Session> {
        let email = email.trim();
        let otp = otp.trim();
        VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        }
        .validate()?;

        let token = self.api.verify_otp(email, otp).await?;
        // Persist only a token the backend has accepted
        let employee = self.api.verify_token(&token).await?;
        self.storage.save(&StoredSession::new(email, token.as_str()))?;
        tracing::info!(email = %employee.email, "Logged in");

        Ok(&*self.session.insert(Session { token, employee }))
    }

    /// Resume a persisted session.
    ///
    /// A token the backend rejects is removed; one that could not be checked
    /// because of a network failure is kept for the next attempt.
    pub async fn restore(&mut self) -> ClientResult<Option<&Session>> {
        let Some(stored) = self.storage.load() else {
            return Ok(None);
        };

        match self.api.verify_token(&stored.token).await {
            Ok(employee) => {
                tracing::info!(email = %employee.email, "Session restored");
                Ok(Some(&*self.session.insert(Session {
                    token: stored.token,
                    employee,
                })))
            }
            Err(e) if e.is_transport() => Err(e),
            Err(e) => {
                tracing::warn!(email = %stored.email, error = %e, "Stored token rejected");
                self.storage.delete()?;
                Err(e)
            }
        }
    }

    /// Order store bound to the current token
    pub fn order_store(&self) -> OrderStore<C> {
        OrderStore::new(self.api.clone(), self.token().map(str::to_string))
            .with_retry_policy(self.retry)
    }

    /// Forget the token and everything the store holds
    pub fn logout(&mut self, store: &mut OrderStore<C>) -> ClientResult<()> {
        store.teardown();
        self.storage.delete()?;
        if let Some(session) = self.session.take() {
            tracing::info!(email = %session.employee.email, "Logged out");
        }
        Ok(())
    }

    /// Reload the employee profile
    pub async fn profile(&mut self) -> ClientResult<&Employee> {
        let session = self.require_session()?;
        let employee = self
            .api
            .get_employee_profile(&session.employee.email, &session.token)
            .await?;
        let session = self
            .session
            .as_mut()
            .ok_or(ClientError::AuthenticationRequired)?;
        session.employee = employee;
        Ok(&session.employee)
    }

    /// Update name and phone; applied locally once the backend accepts it
    pub async fn update_profile(
        &mut self,
        name: Option<String>,
        phone: Option<String>,
    ) -> ClientResult<&Employee> {
        let session = self.require_session()?;
        let update = EmployeeUpdate {
            email: session.employee.email.clone(),
            name,
            phone,
        };
        self.api
            .update_employee_profile(&update, &session.token)
            .await?;

        let session = self
            .session
            .as_mut()
            .ok_or(ClientError::AuthenticationRequired)?;
        if update.name.is_some() {
            session.employee.name = update.name;
        }
        if update.phone.is_some() {
            session.employee.phone = update.phone;
        }
        Ok(&session.employee)
    }
}
