use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::catalog::{CatalogGateway, ProductSnapshot};

use super::error::OrderError;
use super::model::{Actor, NewOrderItem};
use super::service::OrderService;
use super::store::MemoryOrderStore;

mod test_create;
mod test_mutate;
mod test_status;

/// In-memory catalog stub: products keyed by id, editable mid-test to prove
/// that order snapshots never refresh
pub struct StubCatalog {
    products: Mutex<HashMap<String, ProductSnapshot>>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(HashMap::new()),
        }
    }

    pub fn put(&self, product: ProductSnapshot) {
        self.products
            .lock()
            .unwrap()
            .insert(product.id.clone(), product);
    }

    pub fn set_price(&self, product_id: &str, price: Decimal) {
        if let Some(p) = self.products.lock().unwrap().get_mut(product_id) {
            p.price = price;
        }
    }
}

#[async_trait]
impl CatalogGateway for StubCatalog {
    async fn product_snapshot(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductSnapshot>, OrderError> {
        Ok(self.products.lock().unwrap().get(product_id).cloned())
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn paint(id: &str, reference: &str, price: &str, allowed: &[u32]) -> ProductSnapshot {
    ProductSnapshot {
        id: id.to_string(),
        reference: reference.to_string(),
        name: format!("{} Paint", reference),
        size: "1L".to_string(),
        price: dec(price),
        is_active: true,
        allowed_quantities: allowed.to_vec(),
    }
}

pub struct TestRig {
    pub service: OrderService,
    pub catalog: Arc<StubCatalog>,
    pub store: Arc<MemoryOrderStore>,
}

pub fn test_rig() -> TestRig {
    let catalog = Arc::new(StubCatalog::new());
    let store = Arc::new(MemoryOrderStore::new());
    let service = OrderService::new(catalog.clone(), store.clone());
    TestRig {
        service,
        catalog,
        store,
    }
}

/// Rig preloaded with the two reference products used across the suite:
/// A (11.30, allowed [10, 30, 50, 60]) and B (11.99, unrestricted)
pub fn rig_with_catalog() -> TestRig {
    let rig = test_rig();
    rig.catalog.put(paint("A", "PNT-A", "11.30", &[10, 30, 50, 60]));
    rig.catalog.put(paint("B", "PNT-B", "11.99", &[]));
    rig
}

pub fn owner() -> Actor {
    Actor::customer("customer-1")
}

pub fn admin() -> Actor {
    Actor::admin("admin-1")
}

pub fn stranger() -> Actor {
    Actor::customer("customer-2")
}

pub fn item(product_id: &str, quantity: u32) -> NewOrderItem {
    NewOrderItem {
        product_id: product_id.to_string(),
        quantity,
    }
}
