//! Authentication API Endpoints
//! Mission: Provide login and user management endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{
        ChangePasswordRequest, Claims, CreateUserRequest, LoginRequest, LoginResponse,
        UserResponse,
    },
    user_store::UserStore,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<UserStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(user_store: Arc<UserStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            user_store,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.username);

    // Verify credentials; unknown handle and wrong password are
    // indistinguishable to the caller.
    let valid = state
        .user_store
        .verify_login(&payload.username, &payload.password)
        .map_err(|_| AuthApiError::LoginFailed)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let user = state
        .user_store
        .get_user_by_username(&payload.username)
        .map_err(|_| AuthApiError::LoginFailed)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    // Generate JWT token
    let (token, expires_in) = state
        .jwt_handler
        .generate_token(&user)
        .map_err(|_| AuthApiError::LoginFailed)?;

    info!("✅ Login successful: {}", user.username);

    Ok(Json(LoginResponse {
        token,
        expires_in,
        user: UserResponse::from_user(&user),
    }))
}

/// Create user - POST /users
pub async fn create_user(
    State(state): State<AuthState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthApiError> {
    if payload.username.trim().is_empty()
        || payload.pseudonym.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AuthApiError::CreationFailed);
    }

    let user = state
        .user_store
        .create_user(&payload.username, &payload.pseudonym, &payload.password)
        .map_err(|e| {
            warn!("Failed to create user {}: {}", payload.username, e);
            AuthApiError::CreationFailed
        })?;

    info!("✅ User created: {} (by {})", user.username, claims.username);

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}

/// Update user password - PUT /users/:id/password
pub async fn change_password(
    State(state): State<AuthState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AuthApiError> {
    // An ID that parses as no UUID addresses no existing user
    let user_id = Uuid::parse_str(&user_id).map_err(|_| AuthApiError::UserNotFound)?;

    if payload.password.is_empty() {
        return Err(AuthApiError::PasswordUpdateFailed);
    }

    let updated = state
        .user_store
        .update_password(&user_id, &payload.password)
        .map_err(|e| {
            warn!("Failed to update password for {}: {}", user_id, e);
            AuthApiError::PasswordUpdateFailed
        })?;

    if !updated {
        return Err(AuthApiError::UserNotFound);
    }

    Ok(Json(json!({ "message": "Password updated successfully" })))
}

/// Delete user - DELETE /users/:id
pub async fn delete_user(
    State(state): State<AuthState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, AuthApiError> {
    let user_id = Uuid::parse_str(&user_id).map_err(|_| AuthApiError::UserNotFound)?;

    let deleted = state.user_store.delete_user(&user_id).map_err(|e| {
        warn!("Failed to delete user {}: {}", user_id, e);
        AuthApiError::DeletionFailed
    })?;

    if !deleted {
        return Err(AuthApiError::UserNotFound);
    }

    info!("🗑️  User {} deleted (by {})", user_id, claims.username);

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    LoginFailed,
    UserNotFound,
    CreationFailed,
    PasswordUpdateFailed,
    DeletionFailed,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AuthApiError::LoginFailed => (StatusCode::BAD_REQUEST, "Login failed"),
            AuthApiError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            AuthApiError::CreationFailed => (StatusCode::BAD_REQUEST, "Failed to create user"),
            AuthApiError::PasswordUpdateFailed => {
                (StatusCode::BAD_REQUEST, "Failed to update password")
            }
            AuthApiError::DeletionFailed => (StatusCode::BAD_REQUEST, "Failed to delete user"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let invalid_creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid_creds.status(), StatusCode::UNAUTHORIZED);

        let not_found = AuthApiError::UserNotFound.into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let creation = AuthApiError::CreationFailed.into_response();
        assert_eq!(creation.status(), StatusCode::BAD_REQUEST);

        let login = AuthApiError::LoginFailed.into_response();
        assert_eq!(login.status(), StatusCode::BAD_REQUEST);
    }
}
