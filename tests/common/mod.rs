//! Shared utilities for the API integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use taskhub::config::{AppConfig, DatabaseConfig};
use taskhub::lifecycle::{startup, Shutdown};
use taskhub::{HttpServer, Store};

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database = DatabaseConfig::in_memory();
    config
}

/// Router over a fresh in-memory store, plus the store for direct inspection.
pub fn test_app() -> (Router, Store) {
    test_app_with(test_config())
}

pub fn test_app_with(config: AppConfig) -> (Router, Store) {
    let store = Store::open_in_memory().unwrap();
    let server = HttpServer::new(config, store.clone());
    (server.router(), store)
}

/// Drive one request through the router and decode the JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a project and return its id.
pub async fn create_project(router: &Router, name: &str) -> i64 {
    let (status, body) = send(
        router,
        Method::POST,
        "/projects",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["project"]["id"].as_i64().unwrap()
}

/// Create a task and return its id.
pub async fn create_task(router: &Router, project_id: i64, body: Value) -> i64 {
    let (status, body) = send(
        router,
        Method::POST,
        &format!("/projects/{project_id}/tasks"),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["task"]["id"].as_i64().unwrap()
}

/// A live server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub async fn spawn_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let store = Store::open_in_memory().unwrap();

    let mut config = test_config();
    config.listener.bind_address = addr.to_string();

    let handle = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            startup::serve(config, store, listener, shutdown).await.unwrap();
        }
    });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}
