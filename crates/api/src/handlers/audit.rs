//! Handlers for the read-only audit trail.

use axum::extract::{Path, Query, State};
use axum::Json;
use kpi_core::audit::clamp_page;
use kpi_core::types::DbId;
use kpi_db::models::audit::{AuditLog, AuditLogPage, AuditStats};
use kpi_db::repositories::AuditLogRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/audit-logs`.
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogQueryParams {
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/audit-logs
///
/// Newest first. `limit` defaults to 50 and is capped at 500.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AuditLogQueryParams>,
) -> AppResult<Json<AuditLogPage>> {
    let (limit, offset) = clamp_page(params.limit, params.offset);
    let items = AuditLogRepo::list(&state.pool, params.user_id, limit, offset).await?;
    let total = AuditLogRepo::count(&state.pool, params.user_id).await?;
    Ok(Json(AuditLogPage {
        items,
        total,
        limit,
        offset,
    }))
}

/// GET /api/audit-logs/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<AuditStats>> {
    let stats = AuditLogRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/audit-logs/{entity_type}/{entity_id}
///
/// Full history of one entity, oldest first.
pub async fn entity_history(
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(String, DbId)>,
) -> AppResult<Json<Vec<AuditLog>>> {
    let entries = AuditLogRepo::list_for_entity(&state.pool, &entity_type, entity_id).await?;
    Ok(Json(entries))
}
