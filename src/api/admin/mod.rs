//! Admin API 模块
//!
//! 所有路由挂载在 `/api/admin` 下，整体套用 [`require_admin`] 中间件。

pub mod orders;
pub mod password_requests;
pub mod products;
pub mod users;

use axum::{Router, middleware as axum_middleware};

use crate::auth::middleware::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest(
            "/api/admin",
            Router::new()
                .merge(users::routes())
                .merge(products::routes())
                .merge(orders::routes())
                .merge(password_requests::routes()),
        )
        .layer(axum_middleware::from_fn(require_admin))
}
