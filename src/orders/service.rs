//! OrderService - order lifecycle and consistency engine
//!
//! This module handles:
//! - Order creation from a cart, snapshotting the catalog (all-or-nothing)
//! - Authorization-gated mutation: positional item removal, cancellation
//! - Total recomputation and cascading deletion when an order becomes empty
//! - Admin-driven status changes over a flat transition graph
//!
//! # Operation Flow
//!
//! ```text
//! operation(actor, ...)
//!     ├─ 1. Load order from store (missing ⇒ NotFound, any role)
//!     ├─ 2. Guard check (guard.rs)
//!     ├─ 3. Mutate an owned copy, recompute invariants
//!     └─ 4. Single write back (revision-checked) or delete
//! ```
//!
//! Every operation is atomic from the caller's view: validation happens on an
//! in-memory copy and exactly one store write (or none) follows.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::catalog::CatalogGateway;

use super::error::{OrderError, OrderResult};
use super::guard;
use super::model::{Actor, NewOrderItem, Order, OrderLine, OrderStatus};
use super::store::OrderStore;

/// Result of a positional item removal
#[derive(Debug)]
pub enum RemoveItemOutcome {
    /// Line removed, total recomputed, order persisted
    Updated(Order),
    /// The last line was removed; the order was deleted in its entirety
    Deleted,
}

/// Order lifecycle engine
///
/// Holds its collaborators behind trait objects so tests can substitute an
/// in-memory catalog and store without touching the logic.
pub struct OrderService {
    catalog: Arc<dyn CatalogGateway>,
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(catalog: Arc<dyn CatalogGateway>, store: Arc<dyn OrderStore>) -> Self {
        Self { catalog, store }
    }

    /// Create an order from a requested cart.
    ///
    /// Lines are validated in input order against the catalog; the first
    /// failing item aborts the whole call and nothing is persisted. Each line
    /// snapshots the product's reference, name, size and price at this moment.
    pub async fn create_order(
        &self,
        actor: &Actor,
        items: Vec<NewOrderItem>,
        notes: Option<String>,
    ) -> OrderResult<Order> {
        if items.is_empty() {
            return Err(OrderError::Validation("No items in order".into()));
        }

        let mut lines = Vec::with_capacity(items.len());
        let mut total = Decimal::ZERO;

        for item in &items {
            let product = self
                .catalog
                .product_snapshot(&item.product_id)
                .await?
                .ok_or_else(|| {
                    OrderError::NotFound(format!("Product not found: {}", item.product_id))
                })?;

            if !product.is_active {
                return Err(OrderError::Validation(format!(
                    "Product is no longer available: {}",
                    product.reference
                )));
            }

            if item.quantity == 0 {
                return Err(OrderError::Validation(format!(
                    "Quantity must be at least 1 for {}",
                    product.reference
                )));
            }

            if !product.allows_quantity(item.quantity) {
                return Err(OrderError::Validation(format!(
                    "Invalid quantity for {}. Allowed quantities: {}",
                    product.reference,
                    product
                        .allowed_quantities
                        .iter()
                        .map(|q| q.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }

            let line = OrderLine::new(
                product.id,
                product.reference,
                product.name,
                product.size,
                item.quantity,
                product.price,
            );
            total += line.subtotal;
            lines.push(line);
        }

        let order = Order::new(actor.user_id.clone(), lines, notes);
        debug_assert_eq!(order.total, total);
        self.store.insert(&order).await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            lines = order.lines.len(),
            total = %order.total,
            "Order created"
        );
        Ok(order)
    }

    /// Fetch an order, enforcing the view rule (owner or admin)
    pub async fn get_order(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        let order = self.load(order_id).await?;
        guard::ensure_can_view(&order, actor)?;
        Ok(order)
    }

    /// Remove the line at `index` (purely positional).
    ///
    /// Removing the last line deletes the order in its entirety; otherwise the
    /// total is recomputed from the remaining lines and the order persisted.
    pub async fn remove_item(
        &self,
        actor: &Actor,
        order_id: &str,
        index: usize,
    ) -> OrderResult<RemoveItemOutcome> {
        let mut order = self.load(order_id).await?;
        guard::ensure_can_modify(&order, actor)?;

        if index >= order.lines.len() {
            return Err(OrderError::IndexOutOfRange {
                index,
                len: order.lines.len(),
            });
        }

        let removed = order.lines.remove(index);

        if order.lines.is_empty() {
            self.store.delete(&order.id).await?;
            tracing::info!(
                order_id = %order.id,
                line_id = %removed.line_id,
                "Last item removed, order deleted"
            );
            return Ok(RemoveItemOutcome::Deleted);
        }

        order.recompute_total();
        self.write_back(&mut order).await?;
        tracing::info!(
            order_id = %order.id,
            line_id = %removed.line_id,
            remaining = order.lines.len(),
            total = %order.total,
            "Item removed from order"
        );
        Ok(RemoveItemOutcome::Updated(order))
    }

    /// Cancel an order. Lines and total stay untouched.
    ///
    /// Re-cancelling an already-cancelled order as admin succeeds again; the
    /// operation is a plain overwrite, not a guarded transition.
    pub async fn cancel(&self, actor: &Actor, order_id: &str) -> OrderResult<Order> {
        let mut order = self.load(order_id).await?;
        guard::ensure_can_modify(&order, actor)?;

        order.status = OrderStatus::Cancelled;
        order.touch();
        self.write_back(&mut order).await?;
        tracing::info!(order_id = %order.id, "Order cancelled");
        Ok(order)
    }

    /// Admin status change.
    ///
    /// `new_status` must be one of the six enumerated values; the transition
    /// graph is flat, so any status is reachable from any other.
    pub async fn set_status(
        &self,
        actor: &Actor,
        order_id: &str,
        new_status: &str,
    ) -> OrderResult<Order> {
        let mut order = self.load(order_id).await?;
        guard::ensure_admin(actor)?;

        let status: OrderStatus = new_status.parse().map_err(|_| {
            OrderError::Validation(format!(
                "Invalid status. Valid statuses: {}",
                OrderStatus::valid_values()
            ))
        })?;

        order.status = status;
        order.touch();
        self.write_back(&mut order).await?;
        tracing::info!(order_id = %order.id, status = %status, "Order status updated");
        Ok(order)
    }

    /// Admin hard delete
    pub async fn delete_order(&self, actor: &Actor, order_id: &str) -> OrderResult<()> {
        let order = self.load(order_id).await?;
        guard::ensure_admin(actor)?;
        self.store.delete(&order.id).await?;
        tracing::info!(order_id = %order.id, "Order deleted by admin");
        Ok(())
    }

    async fn load(&self, order_id: &str) -> OrderResult<Order> {
        self.store
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::order_not_found(order_id))
    }

    /// Revision-checked write: send the revision we read, store the next one
    async fn write_back(&self, order: &mut Order) -> OrderResult<()> {
        let expected = order.revision;
        order.revision += 1;
        self.store.update(order, expected).await
    }
}
