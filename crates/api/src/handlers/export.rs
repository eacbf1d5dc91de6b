//! Handlers for full-dataset exports.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use kpi_db::repositories::ExportRepo;

use crate::error::AppResult;
use crate::export::{self, JsonExport, XmlExport, XLSX_CONTENT_TYPE};
use crate::state::AppState;

/// GET /api/export/json
pub async fn json(State(state): State<AppState>) -> AppResult<Json<JsonExport>> {
    let data = ExportRepo::snapshot(&state.pool).await?;
    tracing::info!(tasks = data.tasks.len(), "JSON export generated");
    Ok(Json(JsonExport::new(data, Utc::now())))
}

/// GET /api/export/xml
pub async fn xml(State(state): State<AppState>) -> AppResult<Json<XmlExport>> {
    let data = ExportRepo::snapshot(&state.pool).await?;
    let xml = export::xml::render(&data, Utc::now())?;
    tracing::info!(tasks = data.tasks.len(), "XML export generated");
    Ok(Json(XmlExport { xml }))
}

/// GET /api/export/excel
///
/// Streams an `.xlsx` attachment.
pub async fn excel(State(state): State<AppState>) -> AppResult<Response> {
    let data = ExportRepo::snapshot(&state.pool).await?;
    let bytes = export::xlsx::render(&data)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::xlsx_file_name(Utc::now())
    );
    tracing::info!(tasks = data.tasks.len(), bytes = bytes.len(), "Spreadsheet export generated");

    Ok((
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
