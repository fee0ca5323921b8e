//! Router assembly and shared application state.

use crate::{
    auth::{
        api as auth_api, auth_middleware, require_role, AuthState, JwtHandler, RoleGate,
        RoleName, UserStore,
    },
    db::Database,
    inventory::{api as items_api, ItemStore, ItemsState},
    middleware::request_logging,
    models::MessageResponse,
};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Roles allowed to create and delete items
const ADMIN_ONLY: &[RoleName] = &[RoleName::Admin];
/// Roles allowed to update items
const ADMIN_OR_MODERATOR: &[RoleName] = &[RoleName::Admin, RoleName::Moderator];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<UserStore>,
    pub item_store: Arc<ItemStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AppState {
    pub fn new(db: Database, jwt_secret: String) -> Self {
        Self {
            user_store: Arc::new(UserStore::new(db.clone())),
            item_store: Arc::new(ItemStore::new(db)),
            jwt_handler: Arc::new(JwtHandler::new(jwt_secret)),
        }
    }
}

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let auth_state = AuthState::new(state.user_store.clone(), state.jwt_handler.clone());
    let items_state = ItemsState {
        item_store: state.item_store.clone(),
    };

    // Registration and sign-in (separate router with auth state)
    let auth_router = Router::new()
        .route("/register", post(auth_api::register))
        .route("/signin", post(auth_api::signin))
        .with_state(auth_state);

    // Admin-only item routes
    let admin_routes = Router::new()
        .route("/create_item", post(items_api::create_item))
        .route("/delete/item/:id", delete(items_api::delete_item))
        .route_layer(middleware::from_fn_with_state(
            RoleGate::new(state.user_store.clone(), ADMIN_ONLY),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(items_state.clone());

    // Admin or moderator item routes
    let staff_routes = Router::new()
        .route("/update/item/:id", put(items_api::update_item))
        .route_layer(middleware::from_fn_with_state(
            RoleGate::new(state.user_store.clone(), ADMIN_OR_MODERATOR),
            require_role,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_handler.clone(),
            auth_middleware,
        ))
        .with_state(items_state.clone());

    // Public routes (welcome, health check, item listing)
    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .route("/all_items", get(items_api::all_items))
        .with_state(items_state);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(staff_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Welcome endpoint - GET /
async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the VoltBin API."))
}

/// Health check endpoint - GET /health
async fn health_check() -> &'static str {
    "OK"
}
