//! JWT Token Handler
//! Mission: Issue and validate session tokens securely

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    expiration_hours: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: 1, // sessions last one hour
        }
    }

    /// Generate a JWT token carrying the user and role ids
    pub fn generate_token(&self, user_id: i64, role_id: i64) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::hours(self.expiration_hours))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            user_id,
            role_id,
            exp: expiration,
        };

        debug!(
            "Generating JWT for user_id {} (role_id {}), expires in {}h",
            user_id, role_id, self.expiration_hours
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")?;

        Ok(token)
    }

    /// Validate a JWT token and extract claims.
    ///
    /// Expiry is checked with zero leeway: a token is accepted until its exp
    /// instant and rejected strictly after.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for user_id {}", decoded.claims.user_id);

        Ok(decoded.claims)
    }
}
