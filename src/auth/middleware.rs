//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation

use crate::auth::jwt::{JwtHandler, TokenError};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Auth middleware that validates JWT tokens.
///
/// Every request to a protected route passes through here before any
/// handler runs. On success the decoded claims are attached to the request
/// extensions; on any failure the request is rejected with 401 and no
/// handler (and therefore no storage operation) is reached.
///
/// This gate authenticates only - a valid token for any account permits
/// operations on any resource.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;

    // Validate token and extract claims
    let claims = jwt_handler.validate_token(token).map_err(|e| match e {
        TokenError::Expired => AuthError::ExpiredToken,
        TokenError::Invalid => AuthError::InvalidToken,
    })?;

    // Add claims to request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    // Continue to next handler
    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidFormat,
    ExpiredToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Authentication failed: Token missing",
            AuthError::InvalidFormat => {
                "Authentication failed: Invalid authorization format. Use: Bearer <token>"
            }
            AuthError::ExpiredToken => "Authentication failed: Token expired",
            AuthError::InvalidToken => "Authentication failed: Invalid token",
        };

        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_responses_are_401() {
        for error in [
            AuthError::MissingToken,
            AuthError::InvalidFormat,
            AuthError::ExpiredToken,
            AuthError::InvalidToken,
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
