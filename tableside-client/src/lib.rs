//! Tableside Client - staff-side client for the restaurant backend
//!
//! Typed REST calls, the per-session order store, table occupancy derived
//! from live orders and reconciliation of edited orders.

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod orders;
pub mod session;
pub mod tables;

pub use client::{ApiClient, HttpClient, NetworkHttpClient, OneshotHttpClient};
pub use config::{ClientConfig, RetryPolicy};
pub use error::{ClientError, ClientResult};
pub use orders::{OrderDraft, OrderEdit, OrderStore, ReconciledEdit, StoreStatus};
pub use session::{Session, SessionManager, SessionStorage};
pub use tables::{
    TableView, derive_table_status, occupied_count, select_table_for_new_order, table_board,
    table_orders,
};

// Re-export shared types for convenience
pub use shared::models::{
    Category, DiningTable, Employee, MenuItem, Order, OrderItem, OrderStatus, TableStatus,
};
