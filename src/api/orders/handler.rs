//! Order API Handlers
//!
//! Thin HTTP shims over the order engine: the handlers translate the request
//! into an [`Actor`] plus arguments and let the engine enforce every rule.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{OrderView, hydrate_owner, hydrate_owners};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{NewOrderItem, Order, RemoveItemOutcome};
use crate::utils::{AppError, AppResponse, AppResult, PageQuery, Paginated, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<NewOrderItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response for a positional item removal
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveItemResponse {
    /// The order survived with a recomputed total
    Updated { order: Order },
    /// The last line was removed and the order deleted with it
    Deleted,
}

/// GET /api/orders - 当前用户的订单 (分页)
pub async fn list_mine(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<AppResponse<Paginated<OrderView>>>> {
    let (orders, total) = state
        .order_repo()
        .find_page_for_user(&current.id, &page)
        .await
        .map_err(AppError::from)?;
    let views = hydrate_owners(&state.users(), orders).await?;
    Ok(ok(Paginated::new(views, &page, total)))
}

/// POST /api/orders - 从购物车创建订单
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let order = state
        .orders
        .create_order(&current.actor(), req.items, req.notes)
        .await?;
    let view = hydrate_owner(&state.users(), order).await?;
    Ok(ok(view))
}

/// GET /api/orders/:id - 获取订单 (仅所有者或管理员)
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<OrderView>>> {
    let order = state.orders.get_order(&current.actor(), &id).await?;
    let view = hydrate_owner(&state.users(), order).await?;
    Ok(ok(view))
}

/// PUT /api/orders/:id/items/:index - 按位置移除一个条目
///
/// 移除最后一个条目时整个订单被删除。
pub async fn remove_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path((id, index)): Path<(String, usize)>,
) -> AppResult<Json<AppResponse<RemoveItemResponse>>> {
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

/// DELETE /api/orders/:id - 取消订单
///
/// 所有者仅能取消 pending 状态的订单；管理员不受限制。
pub async fn cancel(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state.orders.cancel(&current.actor(), &id).await?;
    Ok(ok_with_message(order, "Order cancelled"))
}
