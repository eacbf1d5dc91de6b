//! Aggregate queries behind the statistics endpoints.

use kpi_core::stats::{average_hours_per_user, TopUser};
use kpi_core::types::WorkDate;
use sqlx::PgPool;

use crate::models::project::DEFAULT_STATUS;
use crate::models::stats::{DailyStats, DailyUserHours, OverviewStats};

/// Read-only statistics over users, projects and tasks.
pub struct StatsRepo;

impl StatsRepo {
    /// Totals for the overview dashboard.
    ///
    /// Hours are summed from `tasks` directly rather than from the derived
    /// `total_hours` columns.
    pub async fn overview(pool: &PgPool) -> Result<OverviewStats, sqlx::Error> {
        let (total_users, total_hours, active_projects, total_tasks) =
            sqlx::query_as::<_, (i64, f64, i64, i64)>(
                "SELECT
                    (SELECT COUNT(*) FROM users)::BIGINT,
                    (SELECT COALESCE(SUM(hours), 0) FROM tasks)::float8,
                    (SELECT COUNT(*) FROM projects WHERE status = $1)::BIGINT,
                    (SELECT COUNT(*) FROM tasks)::BIGINT",
            )
            .bind(DEFAULT_STATUS)
            .fetch_one(pool)
            .await?;

        let top_user = sqlx::query_as::<_, (String, f64)>(
            "SELECT u.name, COALESCE(SUM(t.hours), 0)::float8 AS hours
             FROM users u
             LEFT JOIN tasks t ON t.user_id = u.id
             GROUP BY u.id, u.name
             ORDER BY hours DESC, u.id
             LIMIT 1",
        )
        .fetch_optional(pool)
        .await?
        .map(|(name, hours)| TopUser { name, hours })
        .unwrap_or_else(TopUser::none);

        Ok(OverviewStats {
            total_users,
            total_hours,
            active_projects,
            total_tasks,
            top_user,
            average_hours_per_user: average_hours_per_user(total_hours, total_users),
        })
    }

    /// Every user's hours on `date` (0 for users with no tasks that day).
    pub async fn daily(pool: &PgPool, date: WorkDate) -> Result<DailyStats, sqlx::Error> {
        let user_stats = sqlx::query_as::<_, DailyUserHours>(
            "SELECT u.id AS user_id, u.name, COALESCE(SUM(t.hours), 0)::float8 AS daily_hours
             FROM users u
             LEFT JOIN tasks t ON t.user_id = u.id AND t.date = $1
             GROUP BY u.id, u.name
             ORDER BY daily_hours DESC, u.name",
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        let total_hours = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(hours), 0)::float8 FROM tasks WHERE date = $1",
        )
        .bind(date)
        .fetch_one(pool)
        .await?;

        Ok(DailyStats {
            date,
            total_hours,
            user_stats,
        })
    }
}
