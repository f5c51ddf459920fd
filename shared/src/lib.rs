//! Shared types for Tableside
//!
//! Wire schema of the restaurant backend, the client-side domain models and
//! the normalization step between them. Used by `tableside-client` and by
//! anything that needs to speak the same REST contract (fake backends in
//! tests included).

pub mod client;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Category, DiningTable, EntityRef, Employee, MenuItem, Order, OrderItem, OrderStatus,
    TableStatus,
};
pub use response::ApiResponse;
