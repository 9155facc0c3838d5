//! Catalog gateway
//!
//! The order engine reads products through this trait only. Production wires
//! it to [`crate::db::repository::ProductRepository`]; engine tests substitute
//! an in-memory stub without touching the builder logic.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::OrderError;

/// Read-only product view captured for order building
///
/// An empty `allowed_quantities` set means the product can be ordered in any
/// quantity >= 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: String,
    pub reference: String,
    pub name: String,
    pub size: String,
    pub price: Decimal,
    pub is_active: bool,
    pub allowed_quantities: Vec<u32>,
}

impl ProductSnapshot {
    /// Whether `quantity` is purchasable for this product
    pub fn allows_quantity(&self, quantity: u32) -> bool {
        self.allowed_quantities.is_empty() || self.allowed_quantities.contains(&quantity)
    }
}

/// Read-only product lookup used by the order builder
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Resolve a product by id; `None` when the product does not exist
    async fn product_snapshot(&self, product_id: &str) -> Result<Option<ProductSnapshot>, OrderError>;
}
