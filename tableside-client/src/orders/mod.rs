//! Orders: the session's order cache, edit reconciliation and money math.

pub mod edit;
pub mod money;
pub mod store;

pub use edit::{OrderEdit, ReconciledEdit};
pub use store::{DraftItem, GuestInfo, OrderDraft, OrderStore, StoreStatus};
