//! Handlers for task comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kpi_core::audit::{actions, entity_types, snapshot};
use kpi_core::types::DbId;
use kpi_db::models::comment::{CreateComment, TaskComment};
use kpi_db::repositories::{AuditLogRepo, CommentRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::request_meta::RequestMeta;
use crate::middleware::validated_json::ValidatedJson;
use crate::state::AppState;

/// GET /api/tasks/{id}/comments
pub async fn list_by_task(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<TaskComment>>> {
    if !TaskRepo::exists(&state.pool, task_id).await? {
        return Err(AppError::not_found("Task", task_id));
    }
    let comments = CommentRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(comments))
}

/// POST /api/tasks/{id}/comments
///
/// The audit entry is attributed to the comment's author.
pub async fn create(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> AppResult<(StatusCode, Json<TaskComment>)> {
    if !TaskRepo::exists(&state.pool, task_id).await? {
        return Err(AppError::not_found("Task", task_id));
    }
    if !UserRepo::exists(&state.pool, input.user_id).await? {
        return Err(AppError::not_found("User", input.user_id));
    }

    let mut tx = state.pool.begin().await?;
    let comment = CommentRepo::create(&mut tx, task_id, &input).await?;
    AuditLogRepo::insert(
        &mut tx,
        &ctx.with_actor(comment.user_id).entry(
            actions::CREATE,
            entity_types::TASK_COMMENT,
            comment.id,
            None,
            snapshot(&comment),
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(comment_id = comment.id, task_id, "Comment added");
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/{id}
///
/// Attributed to the `X-User-Id` caller when given, otherwise to the author.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    RequestMeta(ctx): RequestMeta,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let comment = CommentRepo::delete(&mut tx, id)
        .await?
        .ok_or(AppError::not_found("Comment", id))?;

    let actor = ctx.actor_id.unwrap_or(comment.user_id);
    AuditLogRepo::insert(
        &mut tx,
        &ctx.with_actor(actor).entry(
            actions::DELETE,
            entity_types::TASK_COMMENT,
            id,
            snapshot(&comment),
            None,
        ),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(comment_id = id, task_id = comment.task_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
