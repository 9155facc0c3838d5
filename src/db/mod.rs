//! Database Module
//!
//! Owns the embedded SurrealDB instance (RocksDB engine) and the startup
//! schema/seed pass.

pub mod models;
pub mod repository;
pub mod seed;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "lacquer";
const DATABASE: &str = "store";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under `db_path` and apply schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;
        tracing::info!("Database opened at {} (SurrealDB RocksDB engine)", db_path);

        Ok(Self { db })
    }

    /// Uniqueness lives in the engine, not in application checks alone
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            r#"
            DEFINE INDEX IF NOT EXISTS user_email_idx ON TABLE user COLUMNS email UNIQUE;
            DEFINE INDEX IF NOT EXISTS product_reference_idx ON TABLE product COLUMNS reference UNIQUE;
            DEFINE INDEX IF NOT EXISTS order_user_idx ON TABLE order COLUMNS user_id;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        Ok(())
    }
}
