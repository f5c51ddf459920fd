//! Data models
//!
//! Backend-owned entities plus the normalized shapes the client works with.
//! All ids are backend document ids (`_id`) kept as strings.

pub mod category;
pub mod dining_table;
pub mod employee;
pub mod menu_item;
pub mod order;
pub mod reference;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use employee::*;
pub use menu_item::*;
pub use order::*;
pub use reference::*;
