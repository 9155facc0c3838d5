//! Admin user management

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserPublic;
use crate::utils::{AppError, AppResponse, AppResult, PageQuery, Paginated, ok, ok_with_message};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/users", get(list))
        .route("/users/{id}", get(get_by_id).delete(delete))
        .route("/users/by-email/{email}", axum::routing::delete(delete_by_email))
}

/// GET /api/admin/users - 用户列表 (分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<AppResponse<Paginated<UserPublic>>>> {
    let (users, total) = state.users().find_page(&page).await.map_err(AppError::from)?;
    let users = users.iter().map(|u| u.to_public()).collect();
    Ok(ok(Paginated::new(users, &page, total)))
}

/// GET /api/admin/users/:id - 单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let user = state
        .users()
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;
    Ok(ok(user.to_public()))
}

/// DELETE /api/admin/users/:id - 删除用户账户
///
/// 不允许删除自己或其他管理员账户。
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let users = state.users();
    let target = users
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", id)))?;

    delete_checked(&state, &current, target).await
}

/// DELETE /api/admin/users/by-email/:email - 按邮箱删除用户账户
pub async fn delete_by_email(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(email): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let users = state.users();
    let target = users
        .find_by_email(&email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", email)))?;

    delete_checked(&state, &current, target).await
}

async fn delete_checked(
    state: &ServerState,
    current: &CurrentUser,
    target: crate::db::models::User,
) -> AppResult<Json<AppResponse<()>>> {
    let target_id = target.id_string();
    if target_id == current.id {
        return Err(AppError::validation("Cannot delete your own account"));
    }
    if target.is_admin() {
        return Err(AppError::forbidden("Cannot delete an admin account".to_string()));
    }

    state
        .users()
        .delete(&target_id)
        .await
        .map_err(AppError::from)?;
    tracing::info!(user_id = %target_id, admin_id = %current.id, "User deleted by admin");
    Ok(ok_with_message((), "User deleted"))
}
