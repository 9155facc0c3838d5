//! Authentication Handlers
//!
//! Registration, login, profile, and the admin-approved password reset flow.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserPublic;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// POST /api/auth/register - 注册新用户 (角色固定为 user)，直接签发令牌
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    req.validate()?;

    let users = state.users();
    let user = users
        .create(req.name, req.email, &req.password, "user".to_string())
        .await
        .map_err(AppError::from)?;

    let user_id = user.id_string();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, &user.email, &user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, "User registered");
    Ok(ok(LoginResponse {
        token,
        user: user.to_public(),
    }))
}

/// POST /api/auth/login - 登录并签发 JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let users = state.users();
    let user = users.find_by_email(&req.email).await.map_err(AppError::from)?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // 统一错误消息，防止邮箱枚举
    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled".to_string()));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!("WARN", "login_failed", email = req.email.clone());
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id_string();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, &user.email, &user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, "User logged in");
    Ok(ok(LoginResponse {
        token,
        user: user.to_public(),
    }))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<UserPublic>>> {
    let user = state
        .users()
        .find_by_id(&current.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", current.id)))?;
    Ok(ok(user.to_public()))
}

/// POST /api/auth/forgot-password - 提交密码重置请求 (由管理员处理)
///
/// 未知邮箱返回 404；同一账户已有待处理请求时返回 400。
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<AppResponse<()>>> {
    req.validate()?;

    let users = state.users();
    let user = users
        .find_by_email(&req.email)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("No account found for this email".to_string()))?;

    let user_id = user.id_string();
    state
        .password_resets()
        .create(user_id.clone())
        .await
        .map_err(AppError::from)?;
    users
        .mark_reset_requested(&user_id)
        .await
        .map_err(AppError::from)?;

    tracing::info!(user_id = %user_id, "Password reset request filed");
    Ok(ok_with_message(
        (),
        "Password reset request filed; an administrator will process it",
    ))
}

/// PUT /api/auth/update-password - 修改自己的密码 (需验证当前密码)
///
/// 成功后签发新令牌。
pub async fn update_password(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    req.validate()?;

    let users = state.users();
    let user = users
        .find_by_id(&current.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("User {}", current.id)))?;

    let password_valid = user
        .verify_password(&req.current_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !password_valid {
        security_log!("WARN", "password_change_denied", user_id = current.id.clone());
        return Err(AppError::invalid("Current password is incorrect".to_string()));
    }

    let user = users
        .update_password(&user.id_string(), &req.new_password)
        .await
        .map_err(AppError::from)?;

    let user_id = user.id_string();
    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.name, &user.email, &user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user_id, "Password updated");
    Ok(ok_with_message(
        LoginResponse {
            token,
            user: user.to_public(),
        },
        "Password updated",
    ))
}
