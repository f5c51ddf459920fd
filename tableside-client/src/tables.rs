//! Table reconciliation
//!
//! Tables are backend reference data; what staff see is derived from the
//! live order list. A table with any active order is shown as occupied
//! whatever the backend says. Lists stay small (tens of tables and orders),
//! so everything is recomputed on demand with plain scans.

use shared::models::{DiningTable, Order, TableStatus, normalize_tables};

use crate::client::{ApiClient, HttpClient};
use crate::orders::money;
use crate::{ClientError, ClientResult};

/// Active orders placed against the table labelled `table_number`
pub fn table_orders<'a>(table_number: &str, orders: &'a [Order]) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.table_number == table_number && o.is_active())
        .collect()
}

/// Occupied when any active order references the table, else the backend status
pub fn derive_table_status(table: &DiningTable, orders: &[Order]) -> TableStatus {
    if orders
        .iter()
        .any(|o| o.table_number == table.name && o.is_active())
    {
        TableStatus::Occupied
    } else {
        table.status
    }
}

/// Check that a new order may be started on `table`.
///
/// Only the backend-reported status counts here, not the derived occupancy.
pub fn select_table_for_new_order(table: &DiningTable) -> ClientResult<&DiningTable> {
    if table.status == TableStatus::Available {
        Ok(table)
    } else {
        Err(ClientError::TableUnavailable {
            table: table.name.clone(),
            status: table.status.to_string(),
        })
    }
}

/// One card of the floor view
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub table: &'a DiningTable,
    pub display_status: TableStatus,
    pub active_orders: Vec<&'a Order>,
    /// Sum of the active orders' totals
    pub open_amount: f64,
}

/// Floor view: every table with its derived status
pub fn table_board<'a>(tables: &'a [DiningTable], orders: &'a [Order]) -> Vec<TableView<'a>> {
    tables
        .iter()
        .map(|table| {
            let active_orders = table_orders(&table.name, orders);
            let open_amount = money::subtotal(active_orders.iter().map(|o| (o.total, 1)));
            TableView {
                table,
                display_status: derive_table_status(table, orders),
                active_orders,
                open_amount,
            }
        })
        .collect()
}

pub fn occupied_count(tables: &[DiningTable], orders: &[Order]) -> usize {
    tables
        .iter()
        .filter(|t| derive_table_status(t, orders) == TableStatus::Occupied)
        .count()
}

/// Fetch and normalize the table list (duplicates by name dropped)
pub async fn fetch_tables<C: HttpClient>(
    api: &ApiClient<C>,
    token: Option<&str>,
) -> ClientResult<Vec<DiningTable>> {
    let token = token.ok_or(ClientError::AuthenticationRequired)?;
    let raw = api.list_tables(token).await?;
    let tables = normalize_tables(raw);
    tracing::debug!(count = tables.len(), "Tables fetched");
    Ok(tables)
}
