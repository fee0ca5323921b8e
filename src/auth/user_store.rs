//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use crate::auth::models::{RoleName, User};
use crate::db::Database;
use anyhow::{Context, Result};
use bcrypt::{hash, verify};
use rusqlite::params;
use tracing::info;

/// bcrypt work factor for password hashing
pub const BCRYPT_COST: u32 = 10;

/// User storage over the shared database handle
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get user by username
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.db.conn().await;

        let mut stmt = conn.prepare_cached(
            "SELECT user_id, username, email, password, role_id, created_at
             FROM users WHERE username = ?1",
        )?;

        let user_result = stmt.query_row(params![username], |row| {
            Ok(User {
                user_id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                role_id: row.get(4)?,
                created_at: row.get(5)?,
            })
        });

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a username or email is already taken (single query)
    pub async fn username_or_email_exists(&self, username: &str, email: &str) -> Result<bool> {
        let conn = self.db.conn().await;

        let mut stmt = conn
            .prepare_cached("SELECT 1 FROM users WHERE username = ?1 OR email = ?2 LIMIT 1")?;
        let mut rows = stmt.query(params![username, email])?;

        Ok(rows.next()?.is_some())
    }

    /// Create a new user, hashing the password. Returns the new user_id.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role_id: i64,
    ) -> Result<i64> {
        let password_hash = hash(password, BCRYPT_COST).context("Failed to hash password")?;

        let conn = self.db.conn().await;
        conn.execute(
            "INSERT INTO users (username, email, password, role_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, email, password_hash, role_id],
        )
        .context("Failed to insert user")?;

        let user_id = conn.last_insert_rowid();
        info!("✅ Created user: {} (user_id {})", username, user_id);

        Ok(user_id)
    }

    /// Verify a password against a stored bcrypt hash
    pub fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        verify(password, password_hash).context("Failed to verify password")
    }

    /// Resolve a role name to its row id
    pub async fn role_id_by_name(&self, role_name: &str) -> Result<Option<i64>> {
        let conn = self.db.conn().await;

        let mut stmt = conn.prepare_cached("SELECT role_id FROM roles WHERE role_name = ?1")?;
        let result = stmt.query_row(params![role_name], |row| row.get(0));

        match result {
            Ok(role_id) => Ok(Some(role_id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a role id to its name
    pub async fn role_name_by_id(&self, role_id: i64) -> Result<Option<RoleName>> {
        let conn = self.db.conn().await;

        let mut stmt = conn.prepare_cached("SELECT role_name FROM roles WHERE role_id = ?1")?;
        let result = stmt.query_row(params![role_id], |row| row.get::<_, String>(0));

        match result {
            Ok(name) => Ok(RoleName::from_str(&name)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// True when an insert failed on the username/email UNIQUE constraints
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> UserStore {
        let db = Database::open_in_memory().unwrap();
        UserStore::new(db)
    }

    #[tokio::test]
    async fn test_create_and_retrieve_user() {
        let store = create_test_store();

        let user_id = store
            .create_user("alice", "alice@example.com", "Str0ng!Pass", 2)
            .await
            .unwrap();
        assert!(user_id > 0);

        let user = store
            .get_user_by_username("alice")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role_id, 2);

        // Stored hashed, never the plaintext
        assert_ne!(user.password_hash, "Str0ng!Pass");
        assert!(store
            .verify_password("Str0ng!Pass", &user.password_hash)
            .unwrap());
        assert!(!store
            .verify_password("wrongpassword", &user.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let store = create_test_store();
        assert!(store.get_user_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_or_email_exists() {
        let store = create_test_store();
        store
            .create_user("bob", "bob@example.com", "Str0ng!Pass", 2)
            .await
            .unwrap();

        assert!(store
            .username_or_email_exists("bob", "other@example.com")
            .await
            .unwrap());
        assert!(store
            .username_or_email_exists("other", "bob@example.com")
            .await
            .unwrap());
        assert!(!store
            .username_or_email_exists("carol", "carol@example.com")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_unique_violation() {
        let store = create_test_store();
        store
            .create_user("dave", "dave@example.com", "Str0ng!Pass", 2)
            .await
            .unwrap();

        let err = store
            .create_user("dave", "dave2@example.com", "Str0ng!Pass", 2)
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));

        let err = store
            .create_user("dave2", "dave@example.com", "Str0ng!Pass", 2)
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_role_lookups() {
        let store = create_test_store();

        assert_eq!(store.role_id_by_name("admin").await.unwrap(), Some(1));
        assert_eq!(store.role_id_by_name("user").await.unwrap(), Some(2));
        assert_eq!(store.role_id_by_name("moderator").await.unwrap(), Some(3));
        assert_eq!(store.role_id_by_name("superuser").await.unwrap(), None);

        assert_eq!(
            store.role_name_by_id(1).await.unwrap(),
            Some(RoleName::Admin)
        );
        assert_eq!(
            store.role_name_by_id(2).await.unwrap(),
            Some(RoleName::User)
        );
        assert_eq!(
            store.role_name_by_id(3).await.unwrap(),
            Some(RoleName::Moderator)
        );
        assert_eq!(store.role_name_by_id(99).await.unwrap(), None);
    }
}
