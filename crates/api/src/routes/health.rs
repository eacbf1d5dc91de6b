//! Liveness probe. Mounted at the root, outside `/api`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    /// `"ok"` when the database answers, `"unavailable"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl Health {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "unavailable" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.db_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
///
/// Every endpoint needs the database, so an unreachable one makes the whole
/// service unavailable to load balancers.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let db_healthy = match kpi_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let health = Health::new(db_healthy);
    (health.status_code(), Json(health))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_maps_to_503() {
        let health = Health::new(false);
        assert_eq!(health.status, "unavailable");
        assert_eq!(health.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let health = Health::new(true);
        assert_eq!(health.status, "ok");
        assert_eq!(health.status_code(), StatusCode::OK);
    }
}
