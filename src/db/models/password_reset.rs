//! Password Reset Request Model
//!
//! Password resets are admin-approved: a customer files a request, an admin
//! either processes it (setting a new password) or rejects it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Request status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResetStatus {
    Pending,
    Completed,
    Rejected,
}

impl ResetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetStatus::Pending => "pending",
            ResetStatus::Completed => "completed",
            ResetStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ResetStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ResetStatus::Pending),
            "completed" => Ok(ResetStatus::Completed),
            "rejected" => Ok(ResetStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Record id string of the requesting user
    pub user_id: String,
    pub status: ResetStatus,
    #[serde(default)]
    pub completed_by: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetRequest {
    pub fn new(user_id: String) -> Self {
        Self {
            id: None,
            user_id,
            status: ResetStatus::Pending,
            completed_by: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}
