//! Task entity models and DTOs.

use kpi_core::types::{DbId, Timestamp, WorkDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub hours: f64,
    pub date: WorkDate,
    pub created_at: Timestamp,
}

/// A task joined with the names the UI displays next to it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub project_id: DbId,
    pub description: String,
    pub hours: f64,
    pub date: WorkDate,
    pub created_at: Timestamp,
    pub user_name: String,
    pub project_name: String,
    pub module_type: String,
}

/// DTO for logging hours against a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub user_id: DbId,
    pub project_id: DbId,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(range(min = 0.01, max = 24.0, message = "hours must be between 0.01 and 24"))]
    pub hours: f64,
    pub date: WorkDate,
}

/// DTO for editing a task. Ownership (user/project) is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 0.01, max = 24.0, message = "hours must be between 0.01 and 24"))]
    pub hours: Option<f64>,
    pub date: Option<WorkDate>,
}
