//! Order edit reconciliation
//!
//! Staff edit an in-progress order by changing quantities, adding menu items,
//! rewriting per-item instructions or the guest details. [`OrderEdit`] tracks
//! those changes against the original order; [`OrderEdit::reconcile`] turns
//! them into the full update payload the backend expects.
//!
//! Rules applied by `reconcile`:
//! - lines whose quantity reached 0 are left out of the payload entirely
//! - any added item or any changed quantity resets the status to `pending`
//!   so the kitchen sees the order as new work; instruction-only or
//!   guest-only edits keep the current status
//! - every line is repriced from the *current* catalog; tax and discount are
//!   carried over from the original order

use shared::models::{
    MenuItem, Order, OrderItemPayload, OrderStatus, OrderUpdate, find_menu_item,
};

use super::money;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq)]
struct EditLine {
    menu_id: String,
    quantity: i32,
    /// Quantity in the original order; `None` for added items
    original_quantity: Option<i32>,
    original_instruction: Option<String>,
    /// `None` while untouched
    instruction: Option<String>,
}

impl EditLine {
    fn is_new(&self) -> bool {
        self.original_quantity.is_none()
    }

    fn effective_instruction(&self) -> String {
        self.instruction
            .clone()
            .or_else(|| self.original_instruction.clone())
            .unwrap_or_default()
    }
}

/// Result of reconciling an edit
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledEdit {
    /// Payload for `PUT /api/orders`
    pub update: OrderUpdate,
    /// Whether the status was forced back to `pending`
    pub status_reset: bool,
}

/// Pending edit of one order
#[derive(Debug, Clone)]
pub struct OrderEdit {
    original: Order,
    lines: Vec<EditLine>,
    customer_name: String,
    customer_phone: String,
}

impl OrderEdit {
    /// Seed an edit with the order's current lines.
    ///
    /// Repeated lines for the same menu item are merged, so each menu item
    /// is edited (and compared) as one quantity.
    pub fn from_order(order: &Order) -> Self {
        let mut lines: Vec<EditLine> = Vec::with_capacity(order.items.len());
        for item in &order.items {
            if let Some(line) = lines.iter_mut().find(|l| l.menu_id == item.menu_id) {
                line.quantity += item.quantity;
                line.original_quantity = line.original_quantity.map(|q| q + item.quantity);
                continue;
            }
            lines.push(EditLine {
                menu_id: item.menu_id.clone(),
                quantity: item.quantity,
                original_quantity: Some(item.quantity),
                original_instruction: item.instruction.clone(),
                instruction: None,
            });
        }

        Self {
            original: order.clone(),
            lines,
            customer_name: order.customer_name.clone().unwrap_or_default(),
            customer_phone: order.customer_phone.clone().unwrap_or_default(),
        }
    }

    pub fn original(&self) -> &Order {
        &self.original
    }

    pub fn quantity(&self, menu_id: &str) -> i32 {
        self.line(menu_id).map(|l| l.quantity).unwrap_or(0)
    }

    pub fn instruction(&self, menu_id: &str) -> String {
        self.line(menu_id)
            .map(EditLine::effective_instruction)
            .unwrap_or_default()
    }

    fn line(&self, menu_id: &str) -> Option<&EditLine> {
        self.lines.iter().find(|l| l.menu_id == menu_id)
    }

    /// Add `delta` to an item's quantity, never going below 0.
    ///
    /// A positive delta on an item not in the order adds it. Reaching 0
    /// drops the item and forgets its edited instruction.
    pub fn adjust_quantity(&mut self, menu_id: &str, delta: i32) -> i32 {
        let current = self.quantity(menu_id);
        self.set_quantity(menu_id, current.saturating_add(delta))
    }

    /// Set an item's quantity (negative values clamp to 0)
    pub fn set_quantity(&mut self, menu_id: &str, quantity: i32) -> i32 {
        let quantity = quantity.max(0);
        match self.lines.iter_mut().position(|l| l.menu_id == menu_id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = quantity;
                if quantity == 0 {
                    line.instruction = None;
                    if line.is_new() {
                        self.lines.remove(idx);
                    }
                }
            }
            None if quantity > 0 => self.lines.push(EditLine {
                menu_id: menu_id.to_string(),
                quantity,
                original_quantity: None,
                original_instruction: None,
                instruction: None,
            }),
            None => {}
        }
        quantity
    }

    /// Replace an item's instruction; ignored for items not in the edit
    pub fn set_instruction(&mut self, menu_id: &str, instruction: impl Into<String>) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_id == menu_id) {
            line.instruction = Some(instruction.into());
        }
    }

    pub fn set_customer(&mut self, name: impl Into<String>, phone: impl Into<String>) {
        self.customer_name = name.into();
        self.customer_phone = phone.into();
    }

    /// Whether any item was added or any quantity changed
    pub fn has_item_changes(&self) -> bool {
        let added = self.lines.iter().any(|l| l.is_new() && l.quantity > 0);
        let requantified = self
            .lines
            .iter()
            .any(|l| matches!(l.original_quantity, Some(q) if q != l.quantity));
        added || requantified
    }

    /// Running total for display: catalog price, else the price captured
    /// on the order, else 0
    pub fn preview_total(&self, catalog: &[MenuItem]) -> f64 {
        money::subtotal(self.lines.iter().map(|l| {
            let price = find_menu_item(catalog, &l.menu_id)
                .map(|m| m.price)
                .or_else(|| self.original.item(&l.menu_id).map(|i| i.price))
                .unwrap_or(0.0);
            (price, l.quantity)
        }))
    }

    /// Build the update payload against the current catalog
    pub fn reconcile(&self, catalog: &[MenuItem]) -> ClientResult<ReconciledEdit> {
        // Existing lines keep their original position; added lines follow
        // in the order they were added.
        let items: Vec<OrderItemPayload> = self
            .lines
            .iter()
            .filter(|l| l.quantity > 0)
            .map(|l| OrderItemPayload {
                menu_id: l.menu_id.clone(),
                notes: l.effective_instruction(),
                quantity: l.quantity,
            })
            .collect();

        if items.is_empty() {
            return Err(ClientError::Validation(
                "Order must have at least one item".to_string(),
            ));
        }

        let status_reset = self.has_item_changes();
        let status = if status_reset {
            OrderStatus::Pending
        } else {
            self.original.status
        };

        let mut priced = Vec::with_capacity(items.len());
        for item in &items {
            let menu_item = find_menu_item(catalog, &item.menu_id)
                .ok_or_else(|| ClientError::MenuItemNotFound(item.menu_id.clone()))?;
            priced.push((menu_item.price, item.quantity));
        }

        let subtotal = money::subtotal(priced);
        let tax = self.original.tax;
        let discount = self.original.discount;

        tracing::debug!(
            order = %self.original.order_number,
            status_reset,
            subtotal,
            "Reconciled order edit"
        );

        Ok(ReconciledEdit {
            update: OrderUpdate {
                table_id: self.original.table_id.clone(),
                table_number: self.original.table_number.clone(),
                customer_name: self.customer_name.clone(),
                customer_phone: self.customer_phone.clone(),
                order_id: self.original.order_number.clone(),
                items,
                subtotal,
                tax,
                discount,
                total_amount: money::order_total(subtotal, tax, discount),
                status,
            },
            status_reset,
        })
    }
}
