//! Aggregate statistics payloads.

use kpi_core::stats::TopUser;
use kpi_core::types::{DbId, WorkDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Response for the overview dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewStats {
    pub total_users: i64,
    pub total_hours: f64,
    pub active_projects: i64,
    pub total_tasks: i64,
    pub top_user: TopUser,
    pub average_hours_per_user: f64,
}

/// Hours a single user logged on one date (0 when none).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DailyUserHours {
    pub user_id: DbId,
    pub name: String,
    pub daily_hours: f64,
}

/// Per-user breakdown for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: WorkDate,
    pub total_hours: f64,
    pub user_stats: Vec<DailyUserHours>,
}
