//! Order storage record
//!
//! The order engine works with [`crate::orders::Order`]; this record is its
//! SurrealDB shape. Orders are keyed by UUID, and record keys render UUIDs in
//! escaped form, so the content carries the id as a plain `order_id` string
//! and reads never go through the key.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::{Order, OrderLine, OrderStatus};

pub const ORDER_TABLE: &str = "order";

/// SurrealDB row for an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Content for a write; the record is keyed on the same id
    pub fn from_domain(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            user_id: order.user_id.clone(),
            lines: order.lines.clone(),
            total: order.total,
            status: order.status,
            notes: order.notes.clone(),
            revision: order.revision,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }

    /// Rebuild the domain order
    pub fn into_domain(self) -> Order {
        Order {
            id: self.order_id,
            user_id: self.user_id,
            lines: self.lines,
            total: self.total,
            status: self.status,
            notes: self.notes,
            revision: self.revision,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_hyphenated_id() {
        let line = OrderLine::new("p1", "REF-1", "Matte White", "1L", 2, "5.00".parse().unwrap());
        let order = Order::new("user:alice", vec![line], None);
        assert!(order.id.contains('-'));

        let restored = OrderRecord::from_domain(&order).into_domain();
        assert_eq!(restored.id, order.id);
        assert!(!restored.id.contains('`'));
    }
}
