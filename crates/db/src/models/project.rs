//! Project entity model and DTOs.

use kpi_core::types::{DbId, Timestamp};
use kpi_core::visibility::{DepartmentSet, VisibilityType};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Default value of `projects.status`.
pub const DEFAULT_STATUS: &str = "active";

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// Grouping tag such as `proiecte`, `evom` or `operational`.
    pub module_type: String,
    pub status: String,
    /// Sum of this project's task hours, recomputed on every task mutation.
    pub total_hours: f64,
    #[sqlx(try_from = "String")]
    pub visibility_type: VisibilityType,
    #[sqlx(try_from = "Vec<String>")]
    pub visible_departments: DepartmentSet,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "module_type must not be empty"))]
    pub module_type: String,
    /// Defaults to `active`.
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: Option<String>,
    /// Defaults to `all`.
    pub visibility_type: Option<VisibilityType>,
    #[serde(default)]
    pub visible_departments: DepartmentSet,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "module_type must not be empty"))]
    pub module_type: Option<String>,
    #[validate(length(min = 1, message = "status must not be empty"))]
    pub status: Option<String>,
    pub visibility_type: Option<VisibilityType>,
    pub visible_departments: Option<DepartmentSet>,
}
