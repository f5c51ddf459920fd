//! Order store
//!
//! Owned, in-memory cache of the orders held by one staff session. Created at
//! session start, torn down at logout; screens read it and call its
//! operations instead of sharing a global list.
//!
//! Local state only changes after the backend confirmed a write: created
//! orders come from the backend's answer, status changes are applied once
//! accepted, full updates are followed by a complete re-fetch.
//!
//! Failures never escape as `Err`: like the screens it serves, the store
//! keeps one current error message (latest wins) and reports success as a
//! `bool`.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use shared::client::OrderQuery;
use shared::models::{MenuItem, Order, OrderCreate, OrderItemPayload, OrderStatus, OrderUpdate};

use super::edit::OrderEdit;
use super::money;
use crate::client::{ApiClient, HttpClient};
use crate::config::RetryPolicy;
use crate::{ClientError, ClientResult};

/// Guest details captured when placing an order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestInfo {
    pub name: String,
    pub whatsapp: String,
}

/// Line of a new order
#[derive(Debug, Clone, PartialEq)]
pub struct DraftItem {
    pub menu_id: String,
    /// Menu price at the time the item was picked
    pub price: f64,
    pub quantity: i32,
    pub instruction: Option<String>,
}

/// Order being placed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    pub table_id: Option<String>,
    pub table_number: String,
    /// Takes precedence over the flat customer fields
    pub guest_info: Option<GuestInfo>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<DraftItem>,
}

impl OrderDraft {
    pub fn new(table_number: impl Into<String>) -> Self {
        Self {
            table_number: table_number.into(),
            ..Default::default()
        }
    }

    pub fn table_id(mut self, table_id: impl Into<String>) -> Self {
        self.table_id = Some(table_id.into());
        self
    }

    pub fn guest(mut self, name: impl Into<String>, whatsapp: impl Into<String>) -> Self {
        self.guest_info = Some(GuestInfo {
            name: name.into(),
            whatsapp: whatsapp.into(),
        });
        self
    }

    pub fn item(mut self, menu_id: impl Into<String>, price: f64, quantity: i32) -> Self {
        self.items.push(DraftItem {
            menu_id: menu_id.into(),
            price,
            quantity,
            instruction: None,
        });
        self
    }

    /// Backend payload; `None` when no line has a positive quantity
    pub fn to_payload(&self) -> Option<OrderCreate> {
        let lines: Vec<&DraftItem> = self.items.iter().filter(|i| i.quantity > 0).collect();
        if lines.is_empty() {
            return None;
        }

        let (customer_name, customer_phone) = match &self.guest_info {
            Some(guest) => (guest.name.clone(), guest.whatsapp.clone()),
            None => (
                self.customer_name.clone().unwrap_or_default(),
                self.customer_phone.clone().unwrap_or_default(),
            ),
        };

        Some(OrderCreate {
            table_id: self.table_id.clone(),
            table_number: self.table_number.clone(),
            customer_name,
            customer_phone,
            items: lines
                .iter()
                .map(|i| OrderItemPayload {
                    menu_id: i.menu_id.clone(),
                    notes: i.instruction.clone().unwrap_or_default(),
                    quantity: i.quantity,
                })
                .collect(),
            subtotal: money::subtotal(lines.iter().map(|i| (i.price, i.quantity))),
        })
    }
}

/// Observable store status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// In-memory order cache for one session
pub struct OrderStore<C> {
    api: Arc<ApiClient<C>>,
    token: Option<String>,
    orders: Vec<Order>,
    status: watch::Sender<StoreStatus>,
    retry: RetryPolicy,
}

impl<C: HttpClient> OrderStore<C> {
    pub fn new(api: Arc<ApiClient<C>>, token: Option<String>) -> Self {
        let (status, _) = watch::channel(StoreStatus::default());
        Self {
            api,
            token,
            orders: Vec::new(),
            status,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    // ========== State ==========

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn find(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Orders not yet done or cancelled
    pub fn active_orders(&self) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.is_active()).collect()
    }

    pub fn is_loading(&self) -> bool {
        self.status.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.status.borrow().error.clone()
    }

    /// Watch loading/error changes
    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.status.subscribe()
    }

    pub fn clear_error(&self) {
        self.set_error(None);
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Forget everything held for the session (logout)
    pub fn teardown(&mut self) {
        self.orders.clear();
        self.token = None;
        self.status.send_replace(StoreStatus::default());
        tracing::info!("Order store torn down");
    }

    fn set_error(&self, error: Option<String>) {
        self.status.send_modify(|s| s.error = error);
    }

    fn set_loading(&self, loading: bool) {
        self.status.send_modify(|s| s.loading = loading);
    }

    fn record_failure(&self, err: &ClientError) {
        tracing::warn!(error = %err, "Order operation failed");
        self.set_error(Some(err.user_message()));
    }

    fn require_token(&self) -> ClientResult<String> {
        self.token.clone().ok_or(ClientError::AuthenticationRequired)
    }

    // ========== Fetch ==========

    pub async fn fetch_orders(&mut self) -> bool {
        self.fetch(OrderQuery::all()).await
    }

    pub async fn fetch_orders_by_date(&mut self, date: NaiveDate) -> bool {
        self.fetch(OrderQuery::by_date(date)).await
    }

    pub async fn fetch_orders_by_status(&mut self, status: OrderStatus) -> bool {
        self.fetch(OrderQuery::by_status(status)).await
    }

    pub async fn fetch_orders_by_date_and_status(
        &mut self,
        date: NaiveDate,
        status: OrderStatus,
    ) -> bool {
        self.fetch(OrderQuery::by_date_and_status(date, status))
            .await
    }

    /// Replace the local list with the server's result for `query`
    async fn fetch(&mut self, query: OrderQuery) -> bool {
        let token = match self.require_token() {
            Ok(token) => token,
            Err(e) => {
                self.record_failure(&e);
                return false;
            }
        };

        self.set_loading(true);
        let result = self.api.list_orders(&query, &token).await;
        self.set_loading(false);

        match result {
            Ok(raw) => {
                self.orders = raw.into_iter().map(Order::from_raw).collect();
                for order in self.orders.iter().filter(|o| !money::totals_consistent(o)) {
                    tracing::warn!(
                        order = %order.order_number,
                        subtotal = order.subtotal,
                        tax = order.tax,
                        discount = order.discount,
                        total = order.total,
                        "Order total does not match its parts"
                    );
                }
                self.set_error(None);
                tracing::debug!(count = self.orders.len(), ?query, "Orders fetched");
                true
            }
            Err(e) => {
                self.record_failure(&e);
                false
            }
        }
    }

    // ========== Writes ==========

    /// Place a new order and prepend the backend's record
    pub async fn add_order(&mut self, draft: &OrderDraft) -> bool {
        let Some(payload) = draft.to_payload() else {
            self.record_failure(&ClientError::Validation(
                "Order must have at least one item".to_string(),
            ));
            return false;
        };
        let token = match self.require_token() {
            Ok(token) => token,
            Err(e) => {
                self.record_failure(&e);
                return false;
            }
        };

        match self.api.create_order(&payload, &token).await {
            Ok(raw) => {
                let order = Order::from_raw(raw);
                tracing::info!(
                    order = %order.order_number,
                    table = %order.table_number,
                    "Order placed"
                );
                self.orders.insert(0, order);
                self.set_error(None);
                true
            }
            Err(e) => {
                self.record_failure(&e);
                false
            }
        }
    }

    /// Move an order to `status`; the backend needs the whole order, so it
    /// is rebuilt from the local copy
    pub async fn update_order_status(&mut self, order_id: &str, status: OrderStatus) -> bool {
        let Some(order) = self.find(order_id) else {
            self.record_failure(&ClientError::NotFound("Order not found".to_string()));
            return false;
        };
        let payload = OrderUpdate::from_order(order).with_status(status);

        let token = match self.require_token() {
            Ok(token) => token,
            Err(e) => {
                self.record_failure(&e);
                return false;
            }
        };

        match self.api.update_order(&payload, &token).await {
            Ok(()) => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) {
                    tracing::info!(order = %order.order_number, from = %order.status, to = %status, "Order status updated");
                    order.status = status;
                }
                self.set_error(None);
                true
            }
            Err(e) => {
                self.record_failure(&e);
                false
            }
        }
    }

    /// Advance an order one step along the kitchen workflow
    pub async fn advance_order_status(&mut self, order_id: &str) -> bool {
        let Some(order) = self.find(order_id) else {
            self.record_failure(&ClientError::NotFound("Order not found".to_string()));
            return false;
        };
        match order.status.next() {
            Some(next) => self.update_order_status(order_id, next).await,
            None => {
                let err = ClientError::Validation(format!(
                    "Order {} is {} and cannot advance",
                    order.order_number, order.status
                ));
                self.record_failure(&err);
                false
            }
        }
    }

    /// Submit a full order update, retrying transport failures, then
    /// re-fetch the whole list from the backend
    pub async fn update_full_order(&mut self, payload: &OrderUpdate) -> bool {
        let token = match self.require_token() {
            Ok(token) => token,
            Err(e) => {
                self.record_failure(&e);
                return false;
            }
        };

        let policy = self.retry;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.api.update_order(payload, &token).await {
                Ok(()) => break,
                Err(e) if e.is_transport() && attempt < policy.max_attempts => {
                    let delay = policy.delay_after(attempt);
                    tracing::warn!(
                        order = %payload.order_id,
                        attempt,
                        ?delay,
                        error = %e,
                        "Order update failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_transport() => {
                    tracing::error!(order = %payload.order_id, attempt, error = %e, "Order update gave up");
                    self.set_error(Some(format!(
                        "Failed to update order after {} attempts: {}",
                        attempt,
                        e.user_message()
                    )));
                    return false;
                }
                Err(e) => {
                    self.record_failure(&e);
                    return false;
                }
            }
        }

        tracing::info!(order = %payload.order_id, status = %payload.status, "Order updated");
        self.set_error(None);
        // The update itself succeeded; a failed refresh only records its error.
        self.fetch_orders().await;
        true
    }

    /// Reconcile an edit against the current catalog and submit it
    pub async fn apply_edit(&mut self, edit: &OrderEdit, catalog: &[MenuItem]) -> bool {
        match edit.reconcile(catalog) {
            Ok(reconciled) => self.update_full_order(&reconciled.update).await,
            Err(e) => {
                self.record_failure(&e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_payload_uses_guest_info() {
        let draft = OrderDraft::new("T5")
            .table_id("t5")
            .guest("Meera", "9811111111")
            .item("m1", 180.0, 2)
            .item("m2", 40.0, 0);

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.customer_name, "Meera");
        assert_eq!(payload.customer_phone, "9811111111");
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.subtotal, 360.0);
        assert_eq!(payload.table_id.as_deref(), Some("t5"));
    }

    #[test]
    fn test_draft_payload_flat_customer_fields() {
        let mut draft = OrderDraft::new("T2").item("m1", 50.0, 1);
        draft.customer_name = Some("Kiran".into());
        draft.customer_phone = Some("9822222222".into());

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.customer_name, "Kiran");
        assert_eq!(payload.customer_phone, "9822222222");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["items"][0]["menuid"], "m1");
        assert_eq!(json["items"][0]["notes"], "");
        assert_eq!(json["tableNumber"], "T2");
    }

    #[test]
    fn test_empty_draft_has_no_payload() {
        assert!(OrderDraft::new("T1").to_payload().is_none());
        assert!(OrderDraft::new("T1").item("m1", 10.0, 0).to_payload().is_none());
    }
}
