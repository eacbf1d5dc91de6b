//! Handlers for the `/users` resource and the department list.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kpi_core::audit::{actions, entity_types, snapshot};
use kpi_core::error::CoreError;
use kpi_core::types::DbId;
use kpi_db::models::user::{CreateUser, UpdateUser, User};
use kpi_db::repositories::{AuditLogRepo, ProjectRepo, TaskRepo, UserRepo};
use kpi_db::totals;

use crate::error::{AppError, AppResult};
use crate::middleware::request_meta::RequestMeta;
use crate::middleware::validated_json::ValidatedJson;
use crate::state::AppState;

const ENTITY: &str = "User";

fn email_conflict() -> AppError {
    AppError::Core(CoreError::Conflict("Email already exists".into()))
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(user))
}

/// GET /api/users/email/{email}
pub async fn get_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBy {
                entity: ENTITY,
                field: "email",
                value: email.clone(),
            })
        })?;
    Ok(Json(user))
}

/// GET /api/departments
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let departments = UserRepo::list_departments(&state.pool).await?;
    Ok(Json(departments))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(email_conflict());
    }

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(&mut tx, &input).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::CREATE,
            entity_types::USER,
            user.id,
            None,
            snapshot(&user),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, email = %user.email, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> AppResult<Json<User>> {
    let mut tx = state.pool.begin().await?;
    let old = UserRepo::lock(&mut tx, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    if let Some(email) = &input.email {
        if UserRepo::email_taken_by_other(&mut tx, email, id).await? {
            return Err(email_conflict());
        }
    }
    let user = UserRepo::update(&mut tx, id, &input)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(
            actions::UPDATE,
            entity_types::USER,
            id,
            snapshot(&old),
            snapshot(&user),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = id, "User updated");
    Ok(Json(user))
}

/// DELETE /api/users/{id}
///
/// The user's tasks (and their comments) cascade; totals of every project
/// those tasks counted towards are recomputed in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let old = UserRepo::lock(&mut tx, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;

    let project_ids = TaskRepo::project_ids_for_user(&mut tx, id).await?;
    ProjectRepo::lock_many(&mut tx, &project_ids).await?;

    UserRepo::delete(&mut tx, id).await?;
    totals::refresh(&mut tx, &[], &project_ids).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.entry(actions::DELETE, entity_types::USER, id, snapshot(&old), None),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = id, affected_projects = project_ids.len(), "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
