//! Task comment model and DTO.

use kpi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `task_comments`, joined with the author's name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TaskComment {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub comment: String,
    pub created_at: Timestamp,
}

/// DTO for posting a comment. The task id comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    pub user_id: DbId,
    #[validate(length(min = 1, message = "comment must not be empty"))]
    pub comment: String,
}
