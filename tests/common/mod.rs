//! Shared helpers for router integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;

use userbase::config::AppConfig;
use userbase::db::Database;
use userbase::routes::create_router;
use userbase::startup::Readiness;
use userbase::state::AppState;

/// Router plus the temp directory holding its SQLite file.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: Option<TempDir>,
}

fn config_for(url: &str) -> AppConfig {
    let toml = format!(
        r#"
[http]
host = "127.0.0.1"
port = 0

[database]
url = "{}"
max_connections = 2
acquire_timeout_seconds = 1
"#,
        url
    );
    AppConfig::from_toml(&toml, None).unwrap()
}

fn build(url: &str, dir: Option<TempDir>) -> TestApp {
    let config = config_for(url);
    let db = Database::connect_lazy(&config.database).unwrap();
    let state = AppState::new(config, db, Readiness::new());
    TestApp {
        router: create_router(state.clone()),
        state,
        _dir: dir,
    }
}

/// App backed by a fresh, empty SQLite database.
pub fn test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("users.db").display());
    build(&url, Some(dir))
}

/// App backed by a SQLite database that already has the users table.
pub async fn test_app_with_table() -> TestApp {
    let app = test_app();
    app.state.db.create_users_table().await.unwrap();
    app
}

/// App whose database can never be opened.
pub fn unreachable_app() -> TestApp {
    build("sqlite:///nonexistent-userbase-dir/missing/users.db", None)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::GET)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(Method::POST)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
