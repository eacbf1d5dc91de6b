//! HTTP-level tests for the audit trail written by mutation handlers.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_project, create_task, create_user, get, json_request, send};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn mutations_record_actor_ip_and_snapshots(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;

    let mut request = json_request(
        Method::PUT,
        &format!("/api/users/{ana}"),
        json!({"role": "Lead"}),
    );
    let headers = request.headers_mut();
    headers.insert("x-user-id", ana.to_string().parse().unwrap());
    headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
    headers.insert("user-agent", "kpi-tests/1.0".parse().unwrap());
    let response = send(common::build_test_app(pool.clone()), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(get(common::build_test_app(pool), "/api/audit-logs").await).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["limit"], 50);
    assert_eq!(page["offset"], 0);

    let latest = &page["items"][0];
    assert_eq!(latest["action"], "update");
    assert_eq!(latest["entity_type"], "user");
    assert_eq!(latest["entity_id"], ana);
    assert_eq!(latest["user_id"], ana);
    assert_eq!(latest["user_name"], "Ana");
    assert_eq!(latest["ip_address"], "203.0.113.7");
    assert_eq!(latest["user_agent"], "kpi-tests/1.0");
    assert_eq!(latest["old_values"]["role"], "Developer");
    assert_eq!(latest["new_values"]["role"], "Lead");

    let created = &page["items"][1];
    assert_eq!(created["action"], "create");
    assert!(created["old_values"].is_null());
    assert!(created["user_id"].is_null(), "no x-user-id header was sent");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_entries_are_attributed_to_author(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let project = create_project(&pool, "Portal").await;
    let task = create_task(&pool, ana, project, 1.0, "2025-01-15").await;
    common::post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/tasks/{task}/comments"),
        json!({"user_id": ana, "comment": "note"}),
    )
    .await;

    let page = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/audit-logs?user_id={ana}"),
        )
        .await,
    )
    .await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["entity_type"], "task_comment");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_delete_is_audited_with_old_values(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let project = create_project(&pool, "Portal").await;
    let task = create_task(&pool, ana, project, 3.0, "2025-01-15").await;
    common::delete(common::build_test_app(pool.clone()), &format!("/api/tasks/{task}")).await;

    let history = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/audit-logs/task/{task}"),
        )
        .await,
    )
    .await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["action"], "create");
    assert_eq!(history[1]["action"], "delete");
    assert_eq!(history[1]["old_values"]["hours"], 3.0);
    assert!(history[1]["new_values"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pagination_is_clamped(pool: PgPool) {
    for name in ["Ana", "Bob", "Cid"] {
        create_user(&pool, name, "IT").await;
    }

    let page = body_json(
        get(
            common::build_test_app(pool.clone()),
            "/api/audit-logs?limit=2&offset=1",
        )
        .await,
    )
    .await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);

    let page = body_json(
        get(
            common::build_test_app(pool),
            "/api/audit-logs?limit=100000&offset=-5",
        )
        .await,
    )
    .await;
    assert_eq!(page["limit"], 500);
    assert_eq!(page["offset"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_group_by_action_and_entity(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let project = create_project(&pool, "Portal").await;
    let mut request = json_request(
        Method::POST,
        "/api/tasks",
        json!({
            "user_id": ana,
            "project_id": project,
            "description": "Work",
            "hours": 1,
            "date": "2025-01-15",
        }),
    );
    request
        .headers_mut()
        .insert("x-user-id", ana.to_string().parse().unwrap());
    send(common::build_test_app(pool.clone()), request).await;

    let stats = body_json(get(common::build_test_app(pool), "/api/audit-logs/stats").await).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["by_action"][0]["key"], "create");
    assert_eq!(stats["by_action"][0]["count"], 3);
    assert_eq!(stats["by_entity_type"].as_array().unwrap().len(), 3);
    assert_eq!(stats["top_actors"][0]["user_id"], ana);
    assert_eq!(stats["top_actors"][0]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_actor_header_is_rejected(pool: PgPool) {
    let mut request = json_request(
        Method::POST,
        "/api/projects",
        json!({"name": "P", "module_type": "evom"}),
    );
    request
        .headers_mut()
        .insert("x-user-id", "admin".parse().unwrap());
    let response = send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
