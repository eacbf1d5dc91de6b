//! Repository for the `tasks` table.

use kpi_core::types::{DbId, WorkDate};
use sqlx::{PgConnection, PgPool};

use crate::models::task::{CreateTask, Task, TaskDetail, UpdateTask};

/// Column list for plain `tasks` rows.
const COLUMNS: &str =
    "id, user_id, project_id, description, hours::float8 AS hours, date, created_at";

/// Column list for tasks joined with `users u` and `projects p`.
const DETAIL_COLUMNS: &str = "t.id, t.user_id, t.project_id, t.description, \
    t.hours::float8 AS hours, t.date, t.created_at, \
    u.name AS user_name, p.name AS project_name, p.module_type";

/// FROM clause matching [`DETAIL_COLUMNS`].
const DETAIL_FROM: &str = "tasks t \
    JOIN users u ON u.id = t.user_id \
    JOIN projects p ON p.id = t.project_id";

/// Provides CRUD and filtered listing for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// The caller is responsible for locking the owning user and project and
    /// recomputing their totals in the same transaction.
    pub async fn create(conn: &mut PgConnection, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (user_id, project_id, description, hours, date)
             VALUES ($1, $2, $3, $4::numeric, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.user_id)
            .bind(input.project_id)
            .bind(&input.description)
            .bind(input.hours)
            .bind(input.date)
            .fetch_one(conn)
            .await
    }

    /// Find a plain task row by ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lock a task row for the rest of the transaction and return it.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a task with its display names.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TaskDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM} WHERE t.id = $1");
        sqlx::query_as::<_, TaskDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a task with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List every task, newest work date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskDetail>(&query).fetch_all(pool).await
    }

    /// List a single user's tasks, newest work date first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE t.user_id = $1
             ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List tasks logged by members of `department`.
    pub async fn list_by_department(
        pool: &PgPool,
        department: &str,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE u.department = $1
             ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskDetail>(&query)
            .bind(department)
            .fetch_all(pool)
            .await
    }

    /// List tasks worked on a given date, most recently logged first.
    pub async fn list_by_date(
        pool: &PgPool,
        date: WorkDate,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM {DETAIL_FROM}
             WHERE t.date = $1
             ORDER BY t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, TaskDetail>(&query)
            .bind(date)
            .fetch_all(pool)
            .await
    }

    /// Update a task's description, hours or date. Only non-`None` fields change.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                description = COALESCE($2, description),
                hours = COALESCE($3::numeric, hours),
                date = COALESCE($4, date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.hours)
            .bind(input.date)
            .fetch_optional(conn)
            .await
    }

    /// Delete a task (comments cascade). Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Projects that hold at least one task of `user_id`, ascending.
    pub async fn project_ids_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT project_id FROM tasks WHERE user_id = $1 ORDER BY project_id",
        )
        .bind(user_id)
        .fetch_all(conn)
        .await
    }

    /// Users that logged at least one task on `project_id`, ascending.
    pub async fn user_ids_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT user_id FROM tasks WHERE project_id = $1 ORDER BY user_id",
        )
        .bind(project_id)
        .fetch_all(conn)
        .await
    }
}
