//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kpi_core::audit::{actions, entity_types, snapshot};
use kpi_core::types::DbId;
use kpi_db::models::project::{CreateProject, Project, UpdateProject};
use kpi_db::repositories::{AuditLogRepo, ProjectRepo, TaskRepo, UserRepo};
use kpi_db::totals;

use crate::error::{AppError, AppResult};
use crate::middleware::request_meta::RequestMeta;
use crate::middleware::validated_json::ValidatedJson;
use crate::state::AppState;

const ENTITY: &str = "Project";

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(project))
}

/// GET /api/projects/module/{module_type}
pub async fn list_by_module(
    State(state): State<AppState>,
    Path(module_type): Path<String>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_module(&state.pool, &module_type).await?;
    Ok(Json(projects))
}

/// GET /api/projects/department/{department}
///
/// Projects a member of `department` may log time against.
pub async fn list_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_visible_to(&state.pool, &department).await?;
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let mut tx = state.pool.begin().await?;
    let project = ProjectRepo::create(&mut tx, &input).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::CREATE,
            entity_types::PROJECT,
            project.id,
            None,
            snapshot(&project),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let mut tx = state.pool.begin().await?;
    let old = ProjectRepo::lock(&mut tx, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    let project = ProjectRepo::update(&mut tx, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::UPDATE,
            entity_types::PROJECT,
            id,
            snapshot(&old),
            snapshot(&project),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(project_id = id, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Tasks on the project (and their comments) cascade; totals of every user
/// who logged time on it are recomputed in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;

    // Users are locked before projects everywhere else, so do the same here.
    let contributors = TaskRepo::user_ids_for_project(&mut tx, id).await?;
    UserRepo::lock_many(&mut tx, &contributors).await?;
    let old = ProjectRepo::lock(&mut tx, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;

    // Re-read now that new tasks can no longer land on the project.
    let contributors = TaskRepo::user_ids_for_project(&mut tx, id).await?;
    ProjectRepo::delete(&mut tx, id).await?;
    totals::refresh(&mut tx, &contributors, &[]).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::DELETE,
            entity_types::PROJECT,
            id,
            snapshot(&old),
            None,
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(project_id = id, affected_users = contributors.len(), "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
