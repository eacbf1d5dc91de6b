pub mod audit;
pub mod export;
pub mod health;
pub mod project;
pub mod stats;
pub mod task;
pub mod user;

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                   list, create
/// /users/{id}                              get, update, delete
/// /users/email/{email}                     lookup by email
/// /departments                             distinct user departments
///
/// /projects                                list, create
/// /projects/{id}                           get, update, delete
/// /projects/module/{module_type}           filter by module
/// /projects/department/{department}        projects visible to a department
///
/// /tasks                                   list, create
/// /tasks/{id}                              get, update, delete
/// /tasks/user/{user_id}                    filter by user
/// /tasks/date/{date}                       filter by date
/// /tasks/department/{department}           filter by the user's department
/// /tasks/{id}/comments                     list, create
/// /comments/{id}                           delete
///
/// /audit-logs                              paginated trail
/// /audit-logs/stats                        grouped counts
/// /audit-logs/{entity_type}/{entity_id}    one entity's history
///
/// /stats/overview                          dashboard totals
/// /stats/daily/{date}                      per-user hours on a date
///
/// /export/json                             JSON document
/// /export/xml                              XML document wrapped in JSON
/// /export/excel                            .xlsx attachment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", user::router())
        .route("/departments", get(handlers::user::list_departments))
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .route("/comments/{id}", delete(handlers::comment::delete))
        .nest("/audit-logs", audit::router())
        .nest("/stats", stats::router())
        .nest("/export", export::router())
}
