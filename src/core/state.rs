use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::repository::{
    OrderRepository, PasswordResetRepository, ProductRepository, UserRepository,
};
use crate::db::{DbService, seed};
use crate::orders::OrderService;
use crate::utils::AppError;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub orders: Arc<OrderService>,
}

impl ServerState {
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir();
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        seed::ensure_default_admin(&UserRepository::new(db.clone()), config.is_production())
            .await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        // Order engine wired to the database-backed catalog and store
        let catalog = Arc::new(ProductRepository::new(db.clone()));
        let store = Arc::new(OrderRepository::new(db.clone()));
        let orders = Arc::new(OrderService::new(catalog, store));

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            orders,
        })
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.db.clone())
    }

    pub fn order_repo(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    pub fn password_resets(&self) -> PasswordResetRepository {
        PasswordResetRepository::new(self.db.clone())
    }
}
