//! Order Repository
//!
//! SurrealDB adapter behind the engine's [`OrderStore`] seam, plus the listing
//! queries the API layer needs.

use async_trait::async_trait;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, CountRow, RepoResult};
use crate::db::models::{ORDER_TABLE, OrderRecord};
use crate::orders::{Order, OrderError, OrderResult, OrderStatus, OrderStore};
use crate::utils::PageQuery;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id(id: &str) -> RecordId {
        RecordId::from_table_key(ORDER_TABLE, id)
    }

    /// Page of one user's orders, newest first
    pub async fn find_page_for_user(
        &self,
        user_id: &str,
        page: &PageQuery,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let (_, limit) = page.normalized();
        let user_id = user_id.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM type::table($table) WHERE user_id = $user_id \
                 ORDER BY created_at DESC LIMIT $limit START $start",
            )
            .bind(("table", ORDER_TABLE.to_string()))
            .bind(("user_id", user_id.clone()))
            .bind(("limit", limit as i64))
            .bind(("start", page.offset() as i64))
            .query("SELECT count() FROM type::table($table) WHERE user_id = $user_id GROUP ALL")
            .bind(("table", ORDER_TABLE.to_string()))
            .bind(("user_id", user_id))
            .await?;
        let records: Vec<OrderRecord> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((records.into_iter().map(OrderRecord::into_domain).collect(), total))
    }

    /// Page of all orders, optionally narrowed to one status
    pub async fn find_page(
        &self,
        status: Option<OrderStatus>,
        page: &PageQuery,
    ) -> RepoResult<(Vec<Order>, u64)> {
        let (_, limit) = page.normalized();
        let status_str = status.map(|s| s.as_str().to_string());
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM type::table($table) \
                 WHERE $status = NONE OR status = $status \
                 ORDER BY created_at DESC LIMIT $limit START $start",
            )
            .bind(("table", ORDER_TABLE.to_string()))
            .bind(("status", status_str.clone()))
            .bind(("limit", limit as i64))
            .bind(("start", page.offset() as i64))
            .query(
                "SELECT count() FROM type::table($table) \
                 WHERE $status = NONE OR status = $status GROUP ALL",
            )
            .bind(("table", ORDER_TABLE.to_string()))
            .bind(("status", status_str))
            .await?;
        let records: Vec<OrderRecord> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((records.into_iter().map(OrderRecord::into_domain).collect(), total))
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert(&self, order: &Order) -> OrderResult<()> {
        let created: Option<OrderRecord> = self
            .base
            .db()
            .create(Self::record_id(&order.id))
            .content(OrderRecord::from_domain(order))
            .await
            .map_err(|e| OrderError::Storage(e.to_string()))?;
        if created.is_none() {
            return Err(OrderError::Storage(format!(
                "Failed to persist order {}",
                order.id
            )));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> OrderResult<Option<Order>> {
        let record: Option<OrderRecord> = self
            .base
            .db()
            .select(Self::record_id(id))
            .await
            .map_err(|e| OrderError::Storage(e.to_string()))?;
        Ok(record.map(OrderRecord::into_domain))
    }

    async fn update(&self, order: &Order, expected_revision: u64) -> OrderResult<()> {
        // Guarded replace: the UPDATE only fires while the stored revision
        // still matches what the caller read.
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing CONTENT $content WHERE revision = $expected RETURN AFTER")
            .bind(("thing", Self::record_id(&order.id)))
            .bind(("content", OrderRecord::from_domain(order)))
            .bind(("expected", expected_revision))
            .await
            .map_err(|e| OrderError::Storage(e.to_string()))?;
        let updated: Option<OrderRecord> = result
            .take(0)
            .map_err(|e| OrderError::Storage(e.to_string()))?;

        if updated.is_some() {
            return Ok(());
        }

        // Distinguish a lost race from a vanished order
        match self.get(&order.id).await? {
            Some(current) => Err(OrderError::Conflict(format!(
                "Order {} was modified concurrently (expected revision {}, found {})",
                order.id, expected_revision, current.revision
            ))),
            None => Err(OrderError::order_not_found(&order.id)),
        }
    }

    async fn delete(&self, id: &str) -> OrderResult<()> {
        let deleted: Option<OrderRecord> = self
            .base
            .db()
            .delete(Self::record_id(id))
            .await
            .map_err(|e| OrderError::Storage(e.to_string()))?;
        deleted
            .map(|_| ())
            .ok_or_else(|| OrderError::order_not_found(id))
    }
}
