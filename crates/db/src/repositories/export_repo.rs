//! Consistent full-dataset reads for the export endpoints.

use sqlx::PgPool;

use crate::models::export::ExportSnapshot;
use crate::models::project::Project;
use crate::models::task::TaskDetail;
use crate::models::user::User;

const USER_QUERY: &str = "SELECT id, name, email, role, department, \
    total_hours::float8 AS total_hours, created_at FROM users ORDER BY name, id";

const PROJECT_QUERY: &str = "SELECT id, name, description, module_type, status, \
    total_hours::float8 AS total_hours, visibility_type, visible_departments, created_at \
    FROM projects ORDER BY module_type, name, id";

const TASK_QUERY: &str = "SELECT t.id, t.user_id, t.project_id, t.description, \
    t.hours::float8 AS hours, t.date, t.created_at, \
    u.name AS user_name, p.name AS project_name, p.module_type \
    FROM tasks t \
    JOIN users u ON u.id = t.user_id \
    JOIN projects p ON p.id = t.project_id \
    ORDER BY t.date DESC, t.created_at DESC, t.id DESC";

/// Reads the export dataset.
pub struct ExportRepo;

impl ExportRepo {
    /// Read users, projects and tasks inside one read-only repeatable-read
    /// transaction so the three lists describe the same instant.
    pub async fn snapshot(pool: &PgPool) -> Result<ExportSnapshot, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query_as::<_, User>(USER_QUERY)
            .fetch_all(&mut *tx)
            .await?;
        let projects = sqlx::query_as::<_, Project>(PROJECT_QUERY)
            .fetch_all(&mut *tx)
            .await?;
        let tasks = sqlx::query_as::<_, TaskDetail>(TASK_QUERY)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ExportSnapshot {
            users,
            projects,
            tasks,
        })
    }
}
