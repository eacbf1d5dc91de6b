use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Routes mounted at `/export`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/json", get(export::json))
        .route("/xml", get(export::xml))
        .route("/excel", get(export::excel))
}
