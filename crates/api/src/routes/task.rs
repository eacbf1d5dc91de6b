//! Route definitions for the `/tasks` resource, including comments nested
//! under `/tasks/{id}/comments`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comment, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /user/{user_id}            -> list_by_user
/// GET    /date/{date}               -> list_by_date
/// GET    /department/{department}   -> list_by_department
///
/// GET    /{id}/comments             -> comment::list_by_task
/// POST   /{id}/comments             -> comment::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/user/{user_id}", get(task::list_by_user))
        .route("/date/{date}", get(task::list_by_date))
        .route("/department/{department}", get(task::list_by_department))
        .route(
            "/{id}/comments",
            get(comment::list_by_task).post(comment::create),
        )
}
