//! Admin password reset processing
//!
//! Customers file reset requests via `/api/auth/forgot-password`; an admin
//! either processes one (setting the new password) or rejects it.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{PasswordResetRequest, ResetStatus};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/password-requests", get(list))
        .route("/password-requests/{id}/process", post(process))
        .route("/password-requests/{id}/reject", post(reject))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProcessRequest {
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    pub confirm_password: String,
}

/// GET /api/admin/password-requests?status=... - 重置请求列表 (默认 pending)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<PasswordResetRequest>>>> {
    let status = match query.status.as_deref() {
        None => ResetStatus::Pending,
        Some(s) => s.parse().map_err(|_| {
            AppError::validation("Invalid status. Valid statuses: pending, completed, rejected")
        })?,
    };

    let requests = state
        .password_resets()
        .find_by_status(status)
        .await
        .map_err(AppError::from)?;
    Ok(ok(requests))
}

/// POST /api/admin/password-requests/:id/process - 批准并设置新密码
pub async fn process(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<ProcessRequest>,
) -> AppResult<Json<AppResponse<PasswordResetRequest>>> {
    req.validate()?;
    if req.new_password != req.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }

    let resets = state.password_resets();
    let request = resets
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Reset request {}", id)))?;
    // Only pending requests may touch the account
    if request.status != ResetStatus::Pending {
        return Err(AppError::validation(format!(
            "Reset request is already {}",
            request.status.as_str()
        )));
    }

    // Set the password first; a failure leaves the request pending
    state
        .users()
        .update_password(&request.user_id, &req.new_password)
        .await
        .map_err(AppError::from)?;

    let closed = resets
        .close(&id, ResetStatus::Completed, &current.id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        request_id = %id,
        user_id = %closed.user_id,
        admin_id = %current.id,
        "Password reset processed"
    );
    Ok(ok_with_message(closed, "Password reset processed"))
}

/// POST /api/admin/password-requests/:id/reject - 拒绝请求
pub async fn reject(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<PasswordResetRequest>>> {
    let resets = state.password_resets();
    let closed = resets
        .close(&id, ResetStatus::Rejected, &current.id)
        .await
        .map_err(AppError::from)?;

    // The account-level flag clears either way
    clear_reset_flag(&state, &closed.user_id).await?;

    tracing::info!(
        request_id = %id,
        user_id = %closed.user_id,
        admin_id = %current.id,
        "Password reset rejected"
    );
    Ok(ok_with_message(closed, "Password reset rejected"))
}

async fn clear_reset_flag(state: &ServerState, user_id: &str) -> AppResult<()> {
    state
        .db
        .query(
            "UPDATE $thing SET password_reset_requested = false, \
             password_reset_requested_at = NONE",
        )
        .bind((
            "thing",
            surrealdb::RecordId::from_table_key(
                "user",
                user_id.strip_prefix("user:").unwrap_or(user_id),
            ),
        ))
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(())
}
