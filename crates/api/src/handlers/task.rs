//! Handlers for the `/tasks` resource.
//!
//! Every mutation locks the owning user and project rows (in that order),
//! applies the change, recomputes both totals and appends the audit entry in
//! one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kpi_core::audit::{actions, entity_types, snapshot};
use kpi_core::types::{DbId, WorkDate};
use kpi_db::models::task::{CreateTask, Task, TaskDetail, UpdateTask};
use kpi_db::repositories::{AuditLogRepo, ProjectRepo, TaskRepo, UserRepo};
use kpi_db::totals;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::middleware::request_meta::RequestMeta;
use crate::middleware::validated_json::ValidatedJson;
use crate::state::AppState;

const ENTITY: &str = "Task";

/// GET /api/tasks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = TaskRepo::list(&state.pool).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskDetail>> {
    let task = TaskRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(task))
}

/// GET /api/tasks/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    if !UserRepo::exists(&state.pool, user_id).await? {
        return Err(AppError::not_found("User", user_id));
    }
    let tasks = TaskRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/date/{date}
pub async fn list_by_date(
    State(state): State<AppState>,
    Path(date): Path<WorkDate>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = TaskRepo::list_by_date(&state.pool, date).await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/department/{department}
pub async fn list_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = TaskRepo::list_by_department(&state.pool, &department).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let mut tx = state.pool.begin().await?;
    lock_owners(&mut tx, input.user_id, input.project_id).await?;

    let task = TaskRepo::create(&mut tx, &input).await?;
    totals::refresh(&mut tx, &[task.user_id], &[task.project_id]).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::CREATE,
            entity_types::TASK,
            task.id,
            None,
            snapshot(&task),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        task_id = task.id,
        user_id = task.user_id,
        project_id = task.project_id,
        hours = task.hours,
        "Task created",
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let mut tx = state.pool.begin().await?;
    let old = lock_task(&mut tx, id).await?;

    let task = TaskRepo::update(&mut tx, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    totals::refresh(&mut tx, &[task.user_id], &[task.project_id]).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::UPDATE,
            entity_types::TASK,
            id,
            snapshot(&old),
            snapshot(&task),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(task_id = id, hours = task.hours, "Task updated");
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let old = lock_task(&mut tx, id).await?;

    TaskRepo::delete(&mut tx, id).await?;
    totals::refresh(&mut tx, &[old.user_id], &[old.project_id]).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(actions::DELETE, entity_types::TASK, id, snapshot(&old), None),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Lock the user and then the project a task belongs to.
async fn lock_owners(
    conn: &mut PgConnection,
    user_id: DbId,
    project_id: DbId,
) -> AppResult<()> {
    UserRepo::lock(&mut *conn, user_id)
        .await?
        .ok_or(AppError::not_found("User", user_id))?;
    ProjectRepo::lock(&mut *conn, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    Ok(())
}

/// Lock a task's owners, then the task itself, and return its current row.
async fn lock_task(conn: &mut PgConnection, id: DbId) -> AppResult<Task> {
    let existing = TaskRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    // Owners are immutable after creation, so locking them first is stable.
    lock_owners(&mut *conn, existing.user_id, existing.project_id).await?;
    let task = TaskRepo::lock(&mut *conn, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(task)
}
