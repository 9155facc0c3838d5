//! Admin product management
//!
//! Deletion is soft: products deactivate instead of disappearing, so lines in
//! existing orders keep pointing at a real record.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/{id}", put(update).delete(deactivate))
        .route("/products/by-reference/{reference}", put(update_by_reference))
}

/// GET /api/admin/products - 全部商品 (含已下架)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = state
        .products()
        .find_all_with_inactive()
        .await
        .map_err(AppError::from)?;
    Ok(ok(products))
}

/// POST /api/admin/products - 新建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state.products().create(req).await.map_err(AppError::from)?;
    tracing::info!(reference = %product.reference, "Product created");
    Ok(ok(product))
}

/// PUT /api/admin/products/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state
        .products()
        .update(&id, req)
        .await
        .map_err(AppError::from)?;
    tracing::info!(reference = %product.reference, "Product updated");
    Ok(ok(product))
}

/// PUT /api/admin/products/by-reference/:reference - 按编号更新商品
pub async fn update_by_reference(
    State(state): State<ServerState>,
    Path(reference): Path<String>,
    Json(req): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let products = state.products();
    let existing = products
        .find_by_reference(&reference)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Product {}", reference)))?;
    let product = products
        .update(&existing.id_string(), req)
        .await
        .map_err(AppError::from)?;
    tracing::info!(reference = %product.reference, "Product updated");
    Ok(ok(product))
}

/// DELETE /api/admin/products/:id - 下架商品 (软删除)
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state
        .products()
        .deactivate(&id)
        .await
        .map_err(AppError::from)?;
    tracing::info!(reference = %product.reference, "Product deactivated");
    Ok(ok_with_message(product, "Product deactivated"))
}
