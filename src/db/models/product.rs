//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::catalog::ProductSnapshot;

pub type ProductId = RecordId;

/// Paint product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    /// Unique reference code, stored uppercased
    pub reference: String,
    pub name_en: String,
    pub name_fr: String,
    #[serde(default = "default_size")]
    pub size: String,
    pub price: Decimal,
    #[serde(default)]
    pub color: Option<String>,
    /// Purchasable quantities; empty means unrestricted
    #[serde(default)]
    pub allowed_quantities: Vec<u32>,
    /// References of related products
    #[serde(default)]
    pub related_products: Vec<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_size() -> String {
    "1L".to_string()
}

fn default_true() -> bool {
    true
}

/// Default allowed-quantities set for new products
pub fn default_allowed_quantities() -> Vec<u32> {
    vec![1, 5, 10, 20]
}

impl Product {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }

    /// Read-only view handed to the order builder
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            id: self
                .id
                .as_ref()
                .map(|t| t.key().to_string())
                .unwrap_or_default(),
            reference: self.reference.clone(),
            name: self.name_en.clone(),
            size: self.size.clone(),
            price: self.price,
            is_active: self.is_active,
            allowed_quantities: self.allowed_quantities.clone(),
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub reference: String,
    pub name_en: String,
    pub name_fr: String,
    pub price: Decimal,
    pub size: Option<String>,
    pub color: Option<String>,
    pub allowed_quantities: Option<Vec<u32>>,
    pub related_products: Option<Vec<String>>,
}

/// Update product payload (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub reference: Option<String>,
    pub name_en: Option<String>,
    pub name_fr: Option<String>,
    pub price: Option<Decimal>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub allowed_quantities: Option<Vec<u32>>,
    pub related_products: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
