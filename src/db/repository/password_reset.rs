//! Password Reset Repository

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{PasswordResetRequest, ResetStatus};

#[derive(Clone)]
pub struct PasswordResetRepository {
    base: BaseRepository,
}

impl PasswordResetRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        if let Ok(thing) = id.parse::<RecordId>() {
            return Ok(thing);
        }
        Ok(RecordId::from_table_key("password_reset", id))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PasswordResetRequest>> {
        let thing = Self::parse_id(id)?;
        let request: Option<PasswordResetRequest> = self.base.db().select(thing).await?;
        Ok(request)
    }

    /// Open request for a user, if any; at most one is pending at a time
    pub async fn find_pending_by_user(
        &self,
        user_id: &str,
    ) -> RepoResult<Option<PasswordResetRequest>> {
        let user_id = user_id.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM password_reset \
                 WHERE user_id = $user_id AND status = 'pending' LIMIT 1",
            )
            .bind(("user_id", user_id))
            .await?;
        let requests: Vec<PasswordResetRequest> = result.take(0)?;
        Ok(requests.into_iter().next())
    }

    /// All requests with a given status, oldest first
    pub async fn find_by_status(
        &self,
        status: ResetStatus,
    ) -> RepoResult<Vec<PasswordResetRequest>> {
        let requests: Vec<PasswordResetRequest> = self
            .base
            .db()
            .query("SELECT * FROM password_reset WHERE status = $status ORDER BY created_at")
            .bind(("status", status.as_str().to_string()))
            .await?
            .take(0)?;
        Ok(requests)
    }

    /// File a new pending request for a user
    pub async fn create(&self, user_id: String) -> RepoResult<PasswordResetRequest> {
        if self.find_pending_by_user(&user_id).await?.is_some() {
            return Err(RepoError::Duplicate(
                "A password reset request is already pending for this account".to_string(),
            ));
        }
        let request = PasswordResetRequest::new(user_id);
        let created: Option<PasswordResetRequest> = self
            .base
            .db()
            .create("password_reset")
            .content(request)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reset request".to_string()))
    }

    /// Close a pending request as completed or rejected, recording the admin
    pub async fn close(
        &self,
        id: &str,
        outcome: ResetStatus,
        admin_id: &str,
    ) -> RepoResult<PasswordResetRequest> {
        let thing = Self::parse_id(id)?;
        let existing: Option<PasswordResetRequest> =
            self.base.db().select(thing.clone()).await?;
        let existing = existing
            .ok_or_else(|| RepoError::NotFound(format!("Reset request {} not found", id)))?;
        if existing.status != ResetStatus::Pending {
            return Err(RepoError::Validation(format!(
                "Reset request is already {}",
                existing.status.as_str()
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    status = $status,
                    completed_by = $admin,
                    completed_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("status", outcome.as_str().to_string()))
            .bind(("admin", admin_id.to_string()))
            .bind(("now", Utc::now()))
            .await?;
        result
            .take::<Option<PasswordResetRequest>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Reset request {} not found", id)))
    }
}
