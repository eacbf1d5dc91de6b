//! Full-dataset snapshot used by the export endpoints.

use serde::{Deserialize, Serialize};

use crate::models::project::Project;
use crate::models::task::TaskDetail;
use crate::models::user::User;

/// Users, projects and tasks read from one consistent snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<TaskDetail>,
}

impl ExportSnapshot {
    /// Sum of task hours, rounded to cents.
    pub fn total_hours(&self) -> f64 {
        kpi_core::stats::round_hours(self.tasks.iter().map(|t| t.hours).sum())
    }
}
