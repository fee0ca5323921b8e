//! Authentication Module
//! Mission: Secure API access with JWT tokens and RBAC

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;
pub mod validate;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::{auth_middleware, require_role, RoleGate};
pub use models::{Claims, RoleName};
pub use user_store::UserStore;
