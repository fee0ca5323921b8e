//! Authentication Models
//! Mission: Define user, role, and session token data structures

use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role_id: i64,
    pub created_at: String,
}

/// Role names for RBAC
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoleName {
    #[serde(rename = "admin")]
    Admin, // Full item CRUD
    #[serde(rename = "user")]
    User, // Read-only access
    #[serde(rename = "moderator")]
    Moderator, // Read + update access
}

impl RoleName {
    pub fn as_str(&self) -> &str {
        match self {
            RoleName::Admin => "admin",
            RoleName::User => "user",
            RoleName::Moderator => "moderator",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(RoleName::Admin),
            "user" => Some(RoleName::User),
            "moderator" => Some(RoleName::Moderator),
            _ => None,
        }
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub role_id: i64,
    pub exp: usize, // expiration timestamp
}

/// Registration request body. Fields stay optional so missing ones report the
/// contract message instead of a parser error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role_name: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Sign-in request body
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub username: String,
    pub user_id: i64,
    pub role_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_serialization() {
        let admin = RoleName::Admin;
        let json = serde_json::to_string(&admin).unwrap();
        assert_eq!(json, r#""admin""#);

        let moderator: RoleName = serde_json::from_str(r#""moderator""#).unwrap();
        assert_eq!(moderator, RoleName::Moderator);
    }

    #[test]
    fn test_role_name_string_conversion() {
        assert_eq!(RoleName::Admin.as_str(), "admin");
        assert_eq!(RoleName::User.as_str(), "user");
        assert_eq!(RoleName::Moderator.as_str(), "moderator");

        assert_eq!(RoleName::from_str("admin"), Some(RoleName::Admin));
        assert_eq!(RoleName::from_str("MODERATOR"), Some(RoleName::Moderator));
        assert_eq!(RoleName::from_str("superuser"), None);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            user_id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            role_id: 2,
            created_at: "2025-01-01 00:00:00".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$10$"));
    }
}
