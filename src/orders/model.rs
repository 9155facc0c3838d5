//! Order domain model
//!
//! Orders are snapshot-based: each line copies the product's reference, name,
//! size and unit price at creation time. Later catalog edits never touch an
//! existing order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status enum
///
/// The transition graph is flat: an admin may move an order from any status
/// to any other status, including direct jumps such as pending -> delivered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All valid statuses, in display order
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Comma-separated list of valid status values (for error messages)
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// One order line with its product snapshot
///
/// `line_id` is a stable internal identifier; the external removal contract
/// stays positional, but identity-keyed operations can build on it later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub line_id: String,
    pub product_id: String,
    pub reference: String,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl OrderLine {
    /// Build a line from a product snapshot; subtotal = quantity * unit price
    pub fn new(
        product_id: impl Into<String>,
        reference: impl Into<String>,
        name: impl Into<String>,
        size: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        let subtotal = unit_price * Decimal::from(quantity);
        Self {
            line_id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            reference: reference.into(),
            name: name.into(),
            size: size.into(),
            quantity,
            unit_price,
            subtotal,
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    /// Monotonic revision for optimistic concurrency control
    #[serde(default)]
    pub revision: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order from already-validated lines
    pub fn new(user_id: impl Into<String>, lines: Vec<OrderLine>, notes: Option<String>) -> Self {
        let now = Utc::now();
        let total = sum_subtotals(&lines);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            lines,
            total,
            status: OrderStatus::Pending,
            notes,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recompute the total from the current lines and bump `updated_at`
    pub fn recompute_total(&mut self) {
        self.total = sum_subtotals(&self.lines);
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

fn sum_subtotals(lines: &[OrderLine]) -> Decimal {
    lines.iter().map(|l| l.subtotal).sum()
}

/// Actor role, as carried by the identity context
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    Customer,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "user",
            Role::Admin => "admin",
        }
    }
}

/// Identity context for order operations
///
/// Supplied by the authentication layer; the order engine never validates
/// credentials itself.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Customer,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Requested cart line, before catalog validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub product_id: String,
    pub quantity: u32,
}
