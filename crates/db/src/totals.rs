//! Derived `total_hours` maintenance.
//!
//! Totals are never adjusted incrementally. After any statement that adds,
//! changes or removes tasks, the affected users and projects are recomputed
//! from `SUM(tasks.hours)` on the same connection (and so in the same
//! transaction) as the mutation. Callers lock the owning rows first, users
//! before projects, so concurrent writers to the same owner queue up instead
//! of overwriting each other's totals.

use kpi_core::types::DbId;
use sqlx::PgConnection;

use crate::repositories::{ProjectRepo, UserRepo};

/// Recompute totals for the given users and projects.
pub async fn refresh(
    conn: &mut PgConnection,
    user_ids: &[DbId],
    project_ids: &[DbId],
) -> Result<(), sqlx::Error> {
    UserRepo::recompute_total_hours(&mut *conn, user_ids).await?;
    ProjectRepo::recompute_total_hours(&mut *conn, project_ids).await?;
    tracing::debug!(?user_ids, ?project_ids, "Recomputed total hours");
    Ok(())
}
