//! Product API Handlers
//!
//! Customer-facing catalog reads. Inactive products are invisible here; they
//! only surface through the admin endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Product;
use crate::utils::{AppError, AppResponse, AppResult, PageQuery, Paginated, ok};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/products - 分页获取在售商品
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<AppResponse<Paginated<Product>>>> {
    let (products, total) = state
        .products()
        .find_page(&page)
        .await
        .map_err(AppError::from)?;
    Ok(ok(Paginated::new(products, &page, total)))
}

/// GET /api/products/search?q=... - 搜索商品 (编号和名称，忽略大小写)
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = state
        .products()
        .search(&query.q)
        .await
        .map_err(AppError::from)?;
    Ok(ok(products))
}

/// GET /api/products/:id - 按 ID 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = find_active(&state, &id).await?;
    Ok(ok(product))
}

/// GET /api/products/reference/:reference - 按编号获取单个商品
pub async fn get_by_reference(
    State(state): State<ServerState>,
    Path(reference): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state
        .products()
        .find_by_reference(&reference)
        .await
        .map_err(AppError::from)?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {}", reference)))?;
    Ok(ok(product))
}

/// GET /api/products/:id/related - 关联商品
pub async fn related(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let product = find_active(&state, &id).await?;
    let related = state
        .products()
        .find_related(&product)
        .await
        .map_err(AppError::from)?;
    Ok(ok(related))
}

async fn find_active(state: &ServerState, id: &str) -> AppResult<Product> {
    state
        .products()
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))
}
