//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Librarian capability: may renew loans and mark copies returned
    pub can_mark_returned: bool,
    /// Librarian capability: may list every borrowed copy and edit the catalog
    pub can_view_all_borrowed: bool,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub can_mark_returned: bool,
    #[serde(default)]
    pub can_view_all_borrowed: bool,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub can_mark_returned: bool,
    pub can_view_all_borrowed: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Capability checks, evaluated before any storage access

    pub fn require_mark_returned(&self) -> Result<(), AppError> {
        if self.can_mark_returned {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Missing capability: mark returned".to_string(),
            ))
        }
    }

    pub fn require_view_all_borrowed(&self) -> Result<(), AppError> {
        if self.can_view_all_borrowed {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Missing capability: view all borrowed books".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(mark_returned: bool, view_all: bool) -> UserClaims {
        UserClaims {
            sub: "librarian".to_string(),
            user_id: 1,
            can_mark_returned: mark_returned,
            can_view_all_borrowed: view_all,
            exp: 2_000_000_000,
            iat: 0,
        }
    }

    #[test]
    fn capability_checks_refuse_missing_capabilities() {
        let patron = claims(false, false);
        assert!(patron.require_mark_returned().is_err());
        assert!(patron.require_view_all_borrowed().is_err());

        let librarian = claims(true, true);
        assert!(librarian.require_mark_returned().is_ok());
        assert!(librarian.require_view_all_borrowed().is_ok());
    }

    #[test]
    fn token_round_trip_preserves_capabilities() {
        let original = claims(true, false);
        let token = original.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.user_id, original.user_id);
        assert!(parsed.can_mark_returned);
        assert!(!parsed.can_view_all_borrowed);
    }
}
