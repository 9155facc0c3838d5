//! Product Repository

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::catalog::{CatalogGateway, ProductSnapshot};
use crate::db::models::{Product, ProductCreate, ProductUpdate, default_allowed_quantities};
use crate::orders::OrderError;
use crate::utils::PageQuery;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        if let Ok(thing) = id.parse::<RecordId>() {
            return Ok(thing);
        }
        Ok(RecordId::from_table_key("product", id))
    }

    /// Find product by id; accepts "product:xxx" or the bare key
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing = Self::parse_id(id)?;
        let product: Option<Product> = self.base.db().select(thing).await?;
        Ok(product)
    }

    /// Find product by its reference code (case-insensitive)
    pub async fn find_by_reference(&self, reference: &str) -> RepoResult<Option<Product>> {
        let reference = reference.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE reference = $reference LIMIT 1")
            .bind(("reference", reference))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Page of active products, ordered by reference, with the total count
    pub async fn find_page(&self, page: &PageQuery) -> RepoResult<(Vec<Product>, u64)> {
        let (_, limit) = page.normalized();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE is_active = true \
                 ORDER BY reference LIMIT $limit START $start",
            )
            .bind(("limit", limit as i64))
            .bind(("start", page.offset() as i64))
            .query("SELECT count() FROM product WHERE is_active = true GROUP ALL")
            .await?;
        let products: Vec<Product> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((products, total))
    }

    /// All products including inactive, for the admin listing
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY reference")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Case-insensitive search over reference and both display names
    pub async fn search(&self, term: &str) -> RepoResult<Vec<Product>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_active = true ORDER BY reference")
            .await?
            .take(0)?;
        Ok(products
            .into_iter()
            .filter(|p| {
                p.reference.to_lowercase().contains(&needle)
                    || p.name_en.to_lowercase().contains(&needle)
                    || p.name_fr.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Active products whose references appear in `product.related_products`
    pub async fn find_related(&self, product: &Product) -> RepoResult<Vec<Product>> {
        if product.related_products.is_empty() {
            return Ok(Vec::new());
        }
        let refs: Vec<String> = product
            .related_products
            .iter()
            .map(|r| r.to_uppercase())
            .collect();
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE is_active = true AND reference IN $refs \
                 ORDER BY reference",
            )
            .bind(("refs", refs))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Create a new product; fails on duplicate reference
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let reference = data.reference.trim().to_uppercase();
        if reference.is_empty() {
            return Err(RepoError::Validation("Reference is required".to_string()));
        }
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation("Price cannot be negative".to_string()));
        }
        if self.find_by_reference(&reference).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Reference '{}' already exists",
                reference
            )));
        }

        let now = Utc::now();
        let product = Product {
            id: None,
            reference,
            name_en: data.name_en,
            name_fr: data.name_fr,
            size: data.size.unwrap_or_else(|| "1L".to_string()),
            price: data.price,
            color: data.color,
            allowed_quantities: data.allowed_quantities.unwrap_or_else(default_allowed_quantities),
            related_products: data.related_products.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self.base.db().create("product").content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Apply a partial update to a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let thing = Self::parse_id(id)?;
        let mut existing: Product = self
            .base
            .db()
            .select(thing.clone())
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        if let Some(reference) = data.reference {
            let reference = reference.trim().to_uppercase();
            if reference != existing.reference
                && self.find_by_reference(&reference).await?.is_some()
            {
                return Err(RepoError::Duplicate(format!(
                    "Reference '{}' already exists",
                    reference
                )));
            }
            existing.reference = reference;
        }
        if let Some(name_en) = data.name_en {
            existing.name_en = name_en;
        }
        if let Some(name_fr) = data.name_fr {
            existing.name_fr = name_fr;
        }
        if let Some(price) = data.price {
            if price < Decimal::ZERO {
                return Err(RepoError::Validation("Price cannot be negative".to_string()));
            }
            existing.price = price;
        }
        if let Some(size) = data.size {
            existing.size = size;
        }
        if data.color.is_some() {
            existing.color = data.color;
        }
        if let Some(quantities) = data.allowed_quantities {
            existing.allowed_quantities = quantities;
        }
        if let Some(related) = data.related_products {
            existing.related_products = related.into_iter().map(|r| r.to_uppercase()).collect();
        }
        if let Some(is_active) = data.is_active {
            existing.is_active = is_active;
        }
        existing.updated_at = Utc::now();

        let updated: Option<Product> = self.base.db().update(thing).content(existing).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft delete: existing order lines keep their snapshots
    pub async fn deactivate(&self, id: &str) -> RepoResult<Product> {
        let thing = Self::parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET is_active = false, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("now", Utc::now()))
            .await?;
        result
            .take::<Option<Product>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}

#[async_trait]
impl CatalogGateway for ProductRepository {
    async fn product_snapshot(
        &self,
        product_id: &str,
    ) -> Result<Option<ProductSnapshot>, OrderError> {
        let product = self
            .find_by_id(product_id)
            .await
            .map_err(|e| OrderError::Storage(e.to_string()))?;
        Ok(product.map(|p| p.snapshot()))
    }
}
