//! Handlers for dashboard statistics.

use axum::extract::{Path, State};
use axum::Json;
use kpi_core::types::WorkDate;
use kpi_db::models::stats::{DailyStats, OverviewStats};
use kpi_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/stats/overview
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<OverviewStats>> {
    let stats = StatsRepo::overview(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/stats/daily/{date}
pub async fn daily(
    State(state): State<AppState>,
    Path(date): Path<WorkDate>,
) -> AppResult<Json<DailyStats>> {
    let stats = StatsRepo::daily(&state.pool, date).await?;
    Ok(Json(stats))
}
