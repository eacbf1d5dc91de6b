//! Repository for the `projects` table.

use kpi_core::types::DbId;
use kpi_core::visibility::{DepartmentSet, VisibilityType};
use sqlx::{PgConnection, PgPool};

use crate::models::project::{CreateProject, Project, UpdateProject, DEFAULT_STATUS};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, module_type, status, \
    total_hours::float8 AS total_hours, visibility_type, visible_departments, created_at";

/// Provides CRUD and filtered listing for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `status` defaults to `active` and `visibility_type` to `all`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, description, module_type, status, visibility_type, visible_departments)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.module_type)
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(input.visibility_type.unwrap_or_default().as_str())
            .bind(input.visible_departments.to_vec())
            .fetch_one(conn)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects grouped by module type, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY module_type, name, id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List projects with the given module type, ordered by name.
    pub async fn list_by_module(
        pool: &PgPool,
        module_type: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE module_type = $1 ORDER BY name, id");
        sqlx::query_as::<_, Project>(&query)
            .bind(module_type)
            .fetch_all(pool)
            .await
    }

    /// List projects visible to `department`.
    ///
    /// Mirrors [`VisibilityType::is_visible_to`]: `all` projects, plus
    /// `specific_departments` projects whose set contains the department.
    pub async fn list_visible_to(
        pool: &PgPool,
        department: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE visibility_type = $1
                OR (visibility_type = $2 AND $3 = ANY(visible_departments))
             ORDER BY module_type, name, id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(VisibilityType::All.as_str())
            .bind(VisibilityType::SpecificDepartments.as_str())
            .bind(department.trim())
            .fetch_all(pool)
            .await
    }

    /// Lock a project row for the rest of the transaction and return it.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lock several project rows in ascending id order.
    pub async fn lock_many(conn: &mut PgConnection, ids: &[DbId]) -> Result<(), sqlx::Error> {
        if ids.is_empty() {
            return Ok(());
        }
        sqlx::query("SELECT id FROM projects WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(ids)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                module_type = COALESCE($4, module_type),
                status = COALESCE($5, status),
                visibility_type = COALESCE($6, visibility_type),
                visible_departments = COALESCE($7, visible_departments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.module_type)
            .bind(&input.status)
            .bind(input.visibility_type.map(VisibilityType::as_str))
            .bind(input.visible_departments.as_ref().map(DepartmentSet::to_vec))
            .fetch_optional(conn)
            .await
    }

    /// Delete a project; its tasks and their comments cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute `total_hours` for the given projects from their tasks.
    pub async fn recompute_total_hours(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "UPDATE projects p SET total_hours = COALESCE(
                (SELECT SUM(t.hours) FROM tasks t WHERE t.project_id = p.id), 0)
             WHERE p.id = ANY($1)",
        )
        .bind(ids)
        .execute(conn)
        .await?;
        Ok(())
    }
}
