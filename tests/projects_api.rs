//! Project endpoint tests, driven in-process through the router.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use taskhub::store::projects;

mod common;
use common::{create_project, create_task, send, test_app};

#[tokio::test]
async fn test_create_project_returns_envelope() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/projects",
        Some(json!({ "name": "Website", "description": "Relaunch" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Project created");
    assert_eq!(body["project"]["name"], "Website");
    assert_eq!(body["project"]["description"], "Relaunch");
    assert!(body["project"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_project_trims_name() {
    let (app, _) = test_app();

    let (_, body) = send(
        &app,
        Method::POST,
        "/projects",
        Some(json!({ "name": "  Ops  " })),
    )
    .await;

    assert_eq!(body["project"]["name"], "Ops");
    assert!(body["project"]["description"].is_null());
}

#[tokio::test]
async fn test_create_project_rejects_missing_and_blank_names() {
    let (app, store) = test_app();

    for payload in [json!({}), json!({ "name": "   " }), json!({ "name": null })] {
        let (status, body) = send(&app, Method::POST, "/projects", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    let stored = store.read(projects::list).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_list_projects_in_creation_order() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "projects": [] }));

    let first = create_project(&app, "Alpha").await;
    let second = create_project(&app, "Beta").await;

    let (_, body) = send(&app, Method::GET, "/projects", None).await;
    let ids: Vec<i64> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_get_project_includes_tasks() {
    let (app, _) = test_app();
    let project_id = create_project(&app, "Garden").await;
    create_task(&app, project_id, json!({ "title": "Plant tomatoes" })).await;

    let (status, body) = send(&app, Method::GET, &format!("/projects/{project_id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["name"], "Garden");
    assert_eq!(body["project"]["tasks"][0]["title"], "Plant tomatoes");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_get_missing_project() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/projects/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "project 999 not found");
}

#[tokio::test]
async fn test_update_project_partial() {
    let (app, _) = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/projects",
        Some(json!({ "name": "Docs", "description": "v1" })),
    )
    .await;
    let id = created["project"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/projects/{id}"),
        Some(json!({ "name": "Handbook" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project updated");
    assert_eq!(body["project"]["name"], "Handbook");
    assert_eq!(body["project"]["description"], "v1");

    let (_, body) = send(
        &app,
        Method::PUT,
        &format!("/projects/{id}"),
        Some(json!({ "description": null })),
    )
    .await;
    assert!(body["project"]["description"].is_null());
    assert_eq!(body["project"]["name"], "Handbook");
}

#[tokio::test]
async fn test_update_project_rejects_blank_name() {
    let (app, _) = test_app();
    let id = create_project(&app, "Keep").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/projects/{id}"),
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, &format!("/projects/{id}"), None).await;
    assert_eq!(body["project"]["name"], "Keep");
}

#[tokio::test]
async fn test_delete_project_cascades_to_tasks() {
    let (app, _) = test_app();
    let id = create_project(&app, "Temp").await;
    let task_id = create_task(&app, id, json!({ "title": "Scratch" })).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, Method::GET, &format!("/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/projects/{id}/tasks/{task_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/projects/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_project_id() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/projects/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_has_error_body() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "no route for /nope");
}

#[tokio::test]
async fn test_wrong_method_has_error_body() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::DELETE, "/projects", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "method_not_allowed");
}

fn small_body_config() -> taskhub::AppConfig {
    let mut config = common::test_config();
    config.security.max_body_size = 64;
    config
}

#[tokio::test]
async fn test_declared_oversized_body_rejected() {
    let (app, store) = common::test_app_with(small_body_config());
    let payload = json!({ "name": "x".repeat(256) }).to_string();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/projects")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "payload_too_large");
    assert!(store.read(projects::list).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_streamed_oversized_body_rejected() {
    let (app, _) = common::test_app_with(small_body_config());

    let (status, body) = send(
        &app,
        Method::POST,
        "/projects",
        Some(json!({ "name": "x".repeat(256) })),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "payload_too_large");
}

#[tokio::test]
async fn test_body_within_limit_accepted() {
    let (app, _) = common::test_app_with(small_body_config());

    let (status, _) = send(&app, Method::POST, "/projects", Some(json!({ "name": "ok" }))).await;

    assert_eq!(status, StatusCode::CREATED);
}
