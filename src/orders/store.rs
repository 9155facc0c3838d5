//! Order persistence seam
//!
//! The engine talks to a keyed store through [`OrderStore`]. Updates carry the
//! revision the caller read; a mismatch means a concurrent writer got there
//! first and the call fails with `Conflict` instead of silently overwriting.

use async_trait::async_trait;
use dashmap::DashMap;

use super::error::{OrderError, OrderResult};
use super::model::Order;

/// Durable keyed storage for orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order. The order's id must not already exist.
    async fn insert(&self, order: &Order) -> OrderResult<()>;

    /// Fetch an order by id
    async fn get(&self, id: &str) -> OrderResult<Option<Order>>;

    /// Replace a stored order.
    ///
    /// `expected_revision` is the revision the caller read before mutating;
    /// the write fails with [`OrderError::Conflict`] when the stored revision
    /// no longer matches, and with `NotFound` when the order is gone.
    async fn update(&self, order: &Order, expected_revision: u64) -> OrderResult<()>;

    /// Remove an order entirely
    async fn delete(&self, id: &str) -> OrderResult<()>;
}

/// In-memory order store (dashmap)
///
/// Used by engine tests and available as a lightweight backend; the embedded
/// SurrealDB adapter lives in `db::repository::OrderRepository`.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<String, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: &Order) -> OrderResult<()> {
        if self.orders.contains_key(&order.id) {
            return Err(OrderError::Conflict(format!(
                "Order {} already exists",
                order.id
            )));
        }
        self.orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> OrderResult<Option<Order>> {
        Ok(self.orders.get(id).map(|entry| entry.clone()))
    }

    async fn update(&self, order: &Order, expected_revision: u64) -> OrderResult<()> {
        let mut entry = self
            .orders
            .get_mut(&order.id)
            .ok_or_else(|| OrderError::order_not_found(&order.id))?;
        if entry.revision != expected_revision {
            return Err(OrderError::Conflict(format!(
                "Order {} was modified concurrently (expected revision {}, found {})",
                order.id, expected_revision, entry.revision
            )));
        }
        *entry = order.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> OrderResult<()> {
        self.orders
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| OrderError::order_not_found(id))
    }
}
