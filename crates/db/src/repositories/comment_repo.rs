//! Repository for the `task_comments` table.

use kpi_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::comment::{CreateComment, TaskComment};

/// Column list for comments aliased `c` joined with their author `u`.
const COLUMNS: &str = "c.id, c.task_id, c.user_id, u.name AS user_name, c.comment, c.created_at";

/// Provides create/list/delete for task comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment on `task_id`, returning it with the author's name.
    pub async fn create(
        conn: &mut PgConnection,
        task_id: DbId,
        input: &CreateComment,
    ) -> Result<TaskComment, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO task_comments (task_id, user_id, comment)
                VALUES ($1, $2, $3)
                RETURNING id, task_id, user_id, comment, created_at
             )
             SELECT {COLUMNS} FROM c JOIN users u ON u.id = c.user_id"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .bind(input.user_id)
            .bind(&input.comment)
            .fetch_one(conn)
            .await
    }

    /// Comments on a task in chronological order.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.task_id = $1
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a comment, returning the removed row for the audit snapshot.
    ///
    /// Returns `None` if no comment with the given `id` exists.
    pub async fn delete(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<TaskComment>, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                DELETE FROM task_comments WHERE id = $1
                RETURNING id, task_id, user_id, comment, created_at
             )
             SELECT {COLUMNS} FROM c JOIN users u ON u.id = c.user_id"
        );
        sqlx::query_as::<_, TaskComment>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
