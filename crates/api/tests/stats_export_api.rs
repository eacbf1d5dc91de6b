//! HTTP-level tests for `/api/stats` and `/api/export`.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, create_project, create_task, create_user, get, get_json};
use kpi_api::export::JsonExport;
use kpi_db::models::stats::OverviewStats;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn overview_with_no_data(pool: PgPool) {
    let json = body_json(get(common::build_test_app(pool), "/api/stats/overview").await).await;
    assert_eq!(json["total_users"], 0);
    assert_eq!(json["total_hours"], 0.0);
    assert_eq!(json["average_hours_per_user"], 0.0);
    assert_eq!(json["top_user"]["name"], "N/A");
    assert_eq!(json["top_user"]["hours"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overview_and_daily(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let bob = create_user(&pool, "Bob", "Sales").await;
    let project = create_project(&pool, "Portal").await;
    create_task(&pool, ana, project, 5.0, "2025-01-15").await;
    create_task(&pool, bob, project, 2.0, "2025-01-15").await;
    create_task(&pool, bob, project, 1.0, "2025-01-16").await;

    let json = get_json(&pool, "/api/stats/overview").await;
    assert_eq!(json["total_users"], 2);
    assert_eq!(json["total_tasks"], 3);
    assert_eq!(json["active_projects"], 1);
    assert_eq!(json["total_hours"], 8.0);
    assert_eq!(json["average_hours_per_user"], 4.0);
    assert_eq!(json["top_user"]["name"], "Ana");

    let json = body_json(
        get(common::build_test_app(pool.clone()), "/api/stats/daily/2025-01-16").await,
    )
    .await;
    assert_eq!(json["date"], "2025-01-16");
    assert_eq!(json["total_hours"], 1.0);
    let users = json["user_stats"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Bob");
    assert_eq!(users[1]["daily_hours"], 0.0);

    let response = get(common::build_test_app(pool), "/api/stats/daily/16-01-2025").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn json_export_contains_every_table(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let project = create_project(&pool, "Portal").await;
    create_task(&pool, ana, project, 2.5, "2025-01-15").await;

    let response = get(common::build_test_app(pool), "/api/export/json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["export_info"]["format"], "json");
    assert_eq!(json["export_info"]["version"], "1.0.0");
    assert!(json["export_info"]["timestamp"].is_string());
    assert_eq!(json["users"].as_array().unwrap().len(), 1);
    assert_eq!(json["projects"].as_array().unwrap().len(), 1);
    assert_eq!(json["tasks"][0]["hours"], 2.5);
    assert_eq!(json["tasks"][0]["user_name"], "Ana");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn json_export_agrees_with_overview(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let bob = create_user(&pool, "Bob", "Sales").await;
    create_user(&pool, "Cleo", "HR").await;
    let portal = create_project(&pool, "Portal").await;
    let billing = create_project(&pool, "Billing").await;
    create_project(&pool, "Archive").await;
    for (user, project, hours) in [
        (ana, portal, 1.25),
        (ana, billing, 0.33),
        (bob, portal, 7.1),
        (bob, billing, 2.05),
        (ana, portal, 0.01),
    ] {
        create_task(&pool, user, project, hours, "2025-01-15").await;
    }

    let export: JsonExport = serde_json::from_value(get_json(&pool, "/api/export/json").await)
        .expect("export body decodes");
    let overview: OverviewStats =
        serde_json::from_value(get_json(&pool, "/api/stats/overview").await)
            .expect("overview body decodes");

    assert_eq!(export.data.users.len() as i64, overview.total_users);
    assert_eq!(export.data.tasks.len() as i64, overview.total_tasks);
    // Every project is still in its default active status.
    assert_eq!(export.data.projects.len() as i64, overview.active_projects);
    assert_eq!(export.data.total_hours(), overview.total_hours);
    assert_eq!(overview.total_hours, 10.74);

    // Derived per-user totals in the export add up to the same figure.
    let user_total: f64 = export.data.users.iter().map(|u| u.total_hours).sum();
    assert!((user_total - overview.total_hours).abs() < 1e-9);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn xml_export_is_wrapped_in_json(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let project = create_project(&pool, "Portal").await;
    create_task(&pool, ana, project, 2.5, "2025-01-15").await;

    let response = get(common::build_test_app(pool), "/api/export/xml").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let xml = json["xml"].as_str().unwrap();
    assert!(xml.contains("<kpi_export"));
    assert!(xml.contains("email=\"ana@company.com\""));
    assert!(xml.contains("<project "));
    assert!(xml.contains("hours=\"2.5\""));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn excel_export_is_an_attachment(pool: PgPool) {
    let ana = create_user(&pool, "Ana", "IT").await;
    let project = create_project(&pool, "Portal").await;
    create_task(&pool, ana, project, 2.5, "2025-01-15").await;

    let response = get(common::build_test_app(pool), "/api/export/excel").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers.get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = headers
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"kpi_export_"));
    assert!(disposition.ends_with(".xlsx\""));

    let bytes = body_bytes(response).await;
    assert_eq!(&bytes[..2], b"PK");
}
