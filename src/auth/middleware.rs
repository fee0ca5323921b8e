//! Authentication Middleware
//! Mission: Protect API endpoints with JWT validation and role checks

use crate::auth::{
    jwt::JwtHandler,
    models::{Claims, RoleName},
    user_store::UserStore,
};
use crate::models::MessageResponse;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::warn;

/// Auth middleware that validates JWT bearer tokens
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or(AuthError::TokenMissing)?;

    // Anything other than "Bearer <token>" counts as an invalid token
    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(AuthError::InvalidToken)?;

    // Validate token and extract claims
    let claims = jwt_handler
        .validate_token(token.trim())
        .map_err(|_| AuthError::InvalidToken)?;

    // Add claims to request extensions so downstream layers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Role allow-list carried by `require_role`
#[derive(Clone)]
pub struct RoleGate {
    user_store: Arc<UserStore>,
    allowed: &'static [RoleName],
}

impl RoleGate {
    pub fn new(user_store: Arc<UserStore>, allowed: &'static [RoleName]) -> Self {
        Self {
            user_store,
            allowed,
        }
    }
}

/// Role middleware, run after `auth_middleware`. Resolves the caller's
/// role_id through the role table and rejects callers outside the allow-list.
pub async fn require_role(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(AuthError::TokenMissing)?;

    let role = gate
        .user_store
        .role_name_by_id(claims.role_id)
        .await
        .map_err(|e| {
            warn!("Role lookup failed for role_id {}: {}", claims.role_id, e);
            AuthError::Internal
        })?;

    match role {
        Some(role) if gate.allowed.contains(&role) => Ok(next.run(req).await),
        _ => Err(AuthError::Forbidden),
    }
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    TokenMissing,
    InvalidToken,
    Forbidden,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::TokenMissing => (StatusCode::UNAUTHORIZED, "Token Missing"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid Token"),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest};

    #[test]
    fn test_auth_error_responses() {
        let missing = AuthError::TokenMissing.into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let invalid = AuthError::InvalidToken.into_response();
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

        let forbidden = AuthError::Forbidden.into_response();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let internal = AuthError::Internal.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_claims_live_in_request_extensions() {
        let mut req = HttpRequest::new(Body::empty());

        // No claims until the auth middleware inserts them
        assert!(req.extensions().get::<Claims>().is_none());

        let claims = Claims {
            user_id: 5,
            role_id: 2,
            exp: 1234567890,
        };
        req.extensions_mut().insert(claims);

        let extracted = req.extensions().get::<Claims>().unwrap();
        assert_eq!(extracted.user_id, 5);
        assert_eq!(extracted.role_id, 2);
    }
}
