//! User/assignment link model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Link between a user and an assignment.
///
/// The row existing means the assignment is visible to the user;
/// `is_completed` means it is done.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub assignment_id: Uuid,
    pub is_completed: bool,
    pub completed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UserAssignment {
    /// Check that a (possibly missing) link can be completed
    pub fn ensure_completable(link: Option<Self>) -> AppResult<Self> {
        match link {
            Some(link) if !link.is_completed => Ok(link),
            Some(_) => Err(AppError::NotAssigned(
                "Assignment is already completed".to_string(),
            )),
            None => Err(AppError::NotAssigned(
                "Assignment is not assigned to this user".to_string(),
            )),
        }
    }
}

/// Whether an assignment is locked behind its dependency.
///
/// `dependency_link` is the caller's link to the assignment's `dependent_on`,
/// when both exist. A missing link does not lock.
pub fn is_locked(dependency_link: Option<&UserAssignment>) -> bool {
    dependency_link.is_some_and(|link| !link.is_completed)
}
