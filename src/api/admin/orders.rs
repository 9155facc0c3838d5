//! Admin order management

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use serde::Deserialize;

use crate::api::convert::{OrderView, hydrate_owners};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{Order, OrderError, OrderStatus};
use crate::utils::{AppError, AppResponse, AppResult, PageQuery, Paginated, ok, ok_with_message};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/{id}", axum::routing::delete(delete))
        .route("/orders/{id}/status", put(set_status))
        .route("/orders/{id}/items/{index}", put(remove_item))
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl OrderListQuery {
    fn page_query(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// GET /api/admin/orders?status=... - 全部订单 (分页，可按状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<AppResponse<Paginated<OrderView>>>> {
    let status = match &query.status {
        Some(s) => Some(s.parse::<OrderStatus>().map_err(|_| {
            AppError::from(OrderError::Validation(format!(
                "Invalid status. Valid statuses: {}",
                OrderStatus::valid_values()
            )))
        })?),
        None => None,
    };

    let page = query.page_query();
    let (orders, total) = state
        .order_repo()
        .find_page(status, &page)
        .await
        .map_err(AppError::from)?;
    let views = hydrate_owners(&state.users(), orders).await?;
    Ok(ok(Paginated::new(views, &page, total)))
}

/// PUT /api/admin/orders/:id/status - 修改订单状态
pub async fn set_status(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<SetStatusRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state
        .orders
        .set_status(&current.actor(), &id, &req.status)
        .await?;
    Ok(ok(order))
}

/// PUT /api/admin/orders/:id/items/:index - 从任意订单按位置移除条目
pub async fn remove_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((id, index)): Path<(String, usize)>,
) -> AppResult<Json<AppResponse<crate::api::orders::RemoveItemResponse>>> {
    use crate::api::orders::RemoveItemResponse;
    use crate::orders::RemoveItemOutcome;

    let outcome = state
        .orders
        .remove_item(&current.actor(), &id, index)
        .await?;
    match outcome {
        RemoveItemOutcome::Updated(order) => Ok(ok(RemoveItemResponse::Updated { order })),
        RemoveItemOutcome::Deleted => Ok(ok_with_message(
            RemoveItemResponse::Deleted,
            "Last item removed, order deleted",
        )),
    }
}

/// DELETE /api/admin/orders/:id - 彻底删除订单
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    state.orders.delete_order(&current.actor(), &id).await?;
    Ok(ok_with_message((), "Order deleted"))
}
