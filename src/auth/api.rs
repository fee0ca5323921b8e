//! Authentication API Endpoints
//! Mission: Provide registration and sign-in endpoints

use crate::auth::{
    jwt::JwtHandler,
    models::{RegisterRequest, RegisterResponse, SignInRequest, SignInResponse},
    user_store::{is_unique_violation, UserStore},
    validate::{is_valid_email, password_meets_policy},
};
use crate::models::{parse_object, MessageResponse};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Role assigned when registration names none
const DEFAULT_ROLE: &str = "user";

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

/// Registration endpoint - POST /register
pub async fn register(
    State(state): State<AuthState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthApiError> {
    let Json(value) = payload.map_err(|_| AuthApiError::InvalidPayload)?;
    let payload: RegisterRequest = parse_object(value).ok_or(AuthApiError::InvalidPayload)?;

    // Empty strings count as missing, matching the required-fields check
    let (Some(username), Some(email), Some(password)) = (
        payload.username.filter(|s| !s.is_empty()),
        payload.email.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) else {
        return Err(AuthApiError::MissingCredentials);
    };

    if !is_valid_email(&email) {
        return Err(AuthApiError::InvalidEmail);
    }
    if !password_meets_policy(&password) {
        return Err(AuthApiError::WeakPassword);
    }

    let taken = state
        .user_store
        .username_or_email_exists(&username, &email)
        .await
        .map_err(|e| {
            warn!("Failed uniqueness check: {}", e);
            AuthApiError::Internal
        })?;
    if taken {
        return Err(AuthApiError::DuplicateUser);
    }

    // Resolve the requested role; unset or empty means the default
    let role_name = payload
        .role_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_ROLE);
    let role_id = state
        .user_store
        .role_id_by_name(role_name)
        .await
        .map_err(|e| {
            warn!("Failed role lookup: {}", e);
            AuthApiError::Internal
        })?
        .ok_or(AuthApiError::InvalidRole)?;

    let user_id = match state
        .user_store
        .create_user(&username, &email, &password, role_id)
        .await
    {
        Ok(user_id) => user_id,
        // A lost race on the UNIQUE constraints still reports a duplicate
        Err(e) if is_unique_violation(&e) => return Err(AuthApiError::DuplicateUser),
        Err(e) => {
            warn!("Failed to create user: {}", e);
            return Err(AuthApiError::Internal);
        }
    };

    info!("✅ Registered user: {} (user_id {})", username, user_id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully.".to_string(),
            user_id,
        }),
    ))
}

/// Sign-in endpoint - POST /signin
pub async fn signin(
    State(state): State<AuthState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<SignInResponse>, AuthApiError> {
    let Json(value) = payload.map_err(|_| AuthApiError::InvalidPayload)?;
    let payload: SignInRequest = parse_object(value).ok_or(AuthApiError::InvalidPayload)?;

    info!("🔐 Sign-in attempt: {}", payload.username);

    let user = state
        .user_store
        .get_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            warn!("Failed user lookup: {}", e);
            AuthApiError::Internal
        })?;

    // Unknown user and wrong password answer identically
    let Some(user) = user else {
        warn!("❌ Failed sign-in attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    };

    let valid = state
        .user_store
        .verify_password(&payload.password, &user.password_hash)
        .map_err(|e| {
            warn!("Failed password verification: {}", e);
            AuthApiError::Internal
        })?;

    if !valid {
        warn!("❌ Failed sign-in attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .generate_token(user.user_id, user.role_id)
        .map_err(|e| {
            warn!("Failed token generation: {}", e);
            AuthApiError::Internal
        })?;

    info!(
        "✅ Sign-in successful: {} (user_id {})",
        user.username, user.user_id
    );

    Ok(Json(SignInResponse {
        token,
        username: user.username,
        user_id: user.user_id,
        role_id: user.role_id,
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidPayload,
    MissingCredentials,
    InvalidEmail,
    WeakPassword,
    DuplicateUser,
    InvalidRole,
    InvalidCredentials,
    Internal,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidPayload => (StatusCode::BAD_REQUEST, "Invalid payload"),
            AuthApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                "username, email and password are required",
            ),
            AuthApiError::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email format"),
            AuthApiError::WeakPassword => (
                StatusCode::BAD_REQUEST,
                "Password must be at least 8 characters and include uppercase, lowercase, number, and special character",
            ),
            AuthApiError::DuplicateUser => {
                (StatusCode::BAD_REQUEST, "Username or email already exists")
            }
            AuthApiError::InvalidRole => (StatusCode::BAD_REQUEST, "Invalid role specified."),
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AuthApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
