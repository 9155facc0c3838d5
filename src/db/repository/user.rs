//! User Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::User;
use crate::utils::PageQuery;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        if let Ok(thing) = id.parse::<RecordId>() {
            return Ok(thing);
        }
        // Accept a bare key as well as the full "user:key" form
        Ok(RecordId::from_table_key("user", id))
    }

    /// Find user by id; accepts "user:xxx" or the bare key
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = Self::parse_id(id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email (stored lowercased)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user; fails on duplicate email
    pub async fn create(
        &self,
        name: String,
        email: String,
        password: &str,
        role: String,
    ) -> RepoResult<User> {
        let email = email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let hash_pass = User::hash_password(password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let user = User::new(name, email, hash_pass, role);
        let created: Option<User> = self.base.db().create("user").content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Page of users, newest first, with the total row count
    pub async fn find_page(&self, page: &PageQuery) -> RepoResult<(Vec<User>, u64)> {
        let (_, limit) = page.normalized();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY created_at DESC LIMIT $limit START $start")
            .bind(("limit", limit as i64))
            .bind(("start", page.offset() as i64))
            .query("SELECT count() FROM user GROUP ALL")
            .await?;
        let users: Vec<User> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count).unwrap_or(0);
        Ok((users, total))
    }

    /// Replace the stored password hash and clear any pending reset flag
    pub async fn update_password(&self, id: &str, new_password: &str) -> RepoResult<User> {
        let thing = Self::parse_id(id)?;
        let hash_pass = User::hash_password(new_password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    hash_pass = $hash_pass,
                    password_reset_requested = false,
                    password_reset_requested_at = NONE
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("hash_pass", hash_pass))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Flag the account as waiting for an admin-handled password reset
    pub async fn mark_reset_requested(&self, id: &str) -> RepoResult<User> {
        let thing = Self::parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    password_reset_requested = true,
                    password_reset_requested_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("now", Utc::now()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user account
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = Self::parse_id(id)?;
        let existing: Option<User> = self.base.db().select(thing.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("User {} not found", id)));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }

    /// True when the user table is empty (fresh database)
    pub async fn is_empty(&self) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM user GROUP ALL")
            .await?;
        let counts: Vec<CountRow> = result.take(0)?;
        Ok(counts.first().map(|c| c.count).unwrap_or(0) == 0)
    }
}
