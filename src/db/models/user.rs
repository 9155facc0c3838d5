//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

pub type UserId = RecordId;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    /// Argon2 password hash, never exposed through the API
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// "user" | "admin"
    pub role: String,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub password_reset_requested: bool,
    #[serde(default)]
    pub password_reset_requested_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn new(name: String, email: String, hash_pass: String, role: String) -> Self {
        Self {
            id: None,
            name,
            email,
            hash_pass,
            role,
            is_active: true,
            password_reset_requested: false,
            password_reset_requested_at: None,
            created_at: Utc::now(),
        }
    }

    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Record id as a "user:xxx" string, empty when unsaved
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }

    /// Public projection safe for API responses
    pub fn to_public(&self) -> UserPublic {
        UserPublic {
            id: self.id_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            is_active: self.is_active,
            password_reset_requested: self.password_reset_requested,
            created_at: self.created_at,
        }
    }
}

/// Public user view (no credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub password_reset_requested: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = User::hash_password("hunter2-but-longer").unwrap();
        let user = User::new(
            "Jane".into(),
            "jane@example.com".into(),
            hash,
            "user".into(),
        );
        assert!(user.verify_password("hunter2-but-longer").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }
}
