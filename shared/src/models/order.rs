//! Order Model
//!
//! [`RawOrder`] is the record exactly as the backend stores it; [`Order`] is
//! the normalized client shape every consumer works with. The only way from
//! one to the other is [`Order::from_raw`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::reference::EntityRef;
use crate::util::parse_timestamp;

/// Order status
///
/// Kitchen workflow: `pending → preparing → ready → served`. `cancelled` can
/// be reached from any non-terminal state; `done` is set by admins when the
/// order is archived.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Cancelled,
    Done,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Cancelled,
        OrderStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Done => "done",
        }
    }

    /// Anything but `done` and `cancelled`
    pub fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Cancelled | OrderStatus::Done)
    }

    /// Next step of the kitchen workflow, if any
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served | OrderStatus::Cancelled | OrderStatus::Done => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown order status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}

// Backend data is not consistent about casing ("Ready" vs "ready").
impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Wire records
// =============================================================================

/// Order item as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrderItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `null` when the menu item was deleted after the order was placed
    #[serde(rename = "menuid", default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<EntityRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Order as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "orderid", default)]
    pub order_id: String,
    #[serde(rename = "tableid", default, skip_serializing_if = "Option::is_none")]
    pub table: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawOrderItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tax: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// Explicit `null` reads as the type's default, like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Client model
// =============================================================================

/// Display name used when the menu reference was not populated
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Normalized order item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Plain menu item id, kept for update payloads
    pub menu_id: String,
    pub name: String,
    /// Unit price captured from the joined menu entry
    pub price: f64,
    pub quantity: i32,
    pub instruction: Option<String>,
}

impl OrderItem {
    /// A line whose menu reference is gone keeps its own `_id` as the menu
    /// id and shows as [`UNKNOWN_ITEM_NAME`] at price 0.
    pub fn from_raw(raw: RawOrderItem) -> Self {
        let menu = raw.menu.as_ref();
        Self {
            menu_id: menu
                .map(|m| m.id().to_string())
                .or(raw.id)
                .unwrap_or_default(),
            name: menu
                .and_then(EntityRef::name)
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string()),
            price: menu.and_then(EntityRef::price).unwrap_or(0.0),
            quantity: raw.quantity,
            instruction: raw.notes.filter(|n| !n.is_empty()),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Normalized order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Server id (`_id`)
    pub id: String,
    /// Human-readable number (`orderid`)
    pub order_number: String,
    pub table_id: Option<String>,
    /// Display number of the table, matched against table names
    pub table_number: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    /// `totalAmount`
    pub total: f64,
    pub status: OrderStatus,
    pub payment_status: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Normalize a backend record
    pub fn from_raw(raw: RawOrder) -> Self {
        let parse = |v: Option<String>| v.as_deref().and_then(parse_timestamp);

        let table_number = raw
            .table_number
            .clone()
            .or_else(|| raw.table.as_ref().and_then(|t| t.name().map(str::to_string)))
            .unwrap_or_default();

        Self {
            id: raw.id,
            order_number: raw.order_id,
            table_id: raw.table.map(|t| t.id().to_string()),
            table_number,
            customer_name: raw.customer_name.filter(|s| !s.is_empty()),
            customer_phone: raw.customer_phone.filter(|s| !s.is_empty()),
            items: raw.items.into_iter().map(OrderItem::from_raw).collect(),
            subtotal: raw.subtotal,
            tax: raw.tax,
            discount: raw.discount,
            total: raw.total_amount,
            status: raw.status,
            payment_status: raw.payment_status,
            order_date: parse(raw.order_date),
            created_at: parse(raw.created_at),
            updated_at: parse(raw.updated_at),
            completed_at: parse(raw.completed_at),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn item(&self, menu_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.menu_id == menu_id)
    }

    pub fn item_count(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Order line as submitted to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    #[serde(rename = "menuid")]
    pub menu_id: String,
    #[serde(default)]
    pub notes: String,
    pub quantity: i32,
}

impl From<&OrderItem> for OrderItemPayload {
    fn from(item: &OrderItem) -> Self {
        Self {
            menu_id: item.menu_id.clone(),
            notes: item.instruction.clone().unwrap_or_default(),
            quantity: item.quantity,
        }
    }
}

/// Create order payload (`POST /api/orders`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(rename = "tableid", default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub table_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    pub items: Vec<OrderItemPayload>,
    pub subtotal: f64,
}

/// Full order update payload (`PUT /api/orders`)
///
/// The backend replaces the whole order, status included, so every field is
/// always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(rename = "tableid", default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub table_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(rename = "orderid")]
    pub order_id: String,
    pub items: Vec<OrderItemPayload>,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total_amount: f64,
    pub status: OrderStatus,
}

impl OrderUpdate {
    /// Rebuild the full representation of a locally held order
    pub fn from_order(order: &Order) -> Self {
        Self {
            table_id: order.table_id.clone(),
            table_number: order.table_number.clone(),
            customer_name: order.customer_name.clone().unwrap_or_default(),
            customer_phone: order.customer_phone.clone().unwrap_or_default(),
            order_id: order.order_number.clone(),
            items: order.items.iter().map(OrderItemPayload::from).collect(),
            subtotal: order.subtotal,
            tax: order.tax,
            discount: order.discount,
            total_amount: order.total,
            status: order.status,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}
