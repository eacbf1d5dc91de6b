//! Route definitions for `/audit-logs`. Read-only: entries are written by
//! the mutation handlers.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// ```text
/// GET /                              -> list
/// GET /stats                         -> stats
/// GET /{entity_type}/{entity_id}     -> entity_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::list))
        .route("/stats", get(audit::stats))
        .route("/{entity_type}/{entity_id}", get(audit::entity_history))
}
