//! API integration tests.

use axum::http::{header, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use userbase::startup::{run_gate, RetryPolicy, StartupPolicy};

mod common;
use common::{body_json, get, post_json, test_app, test_app_with_table, unreachable_app};

fn alice() -> serde_json::Value {
    json!({
        "username": "alice",
        "password": "pw1",
        "email": "a@x.com"
    })
}

/// Root answers with the fixed payload.
#[tokio::test]
async fn test_root_returns_hello_world() {
    let app = test_app();

    let response = app.router.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({"status": "success", "message": "Hello world"}));
}

/// Root does not depend on the database.
#[tokio::test]
async fn test_root_ok_when_database_unreachable() {
    let app = unreachable_app();

    let response = app.router.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Hello world");
}

#[tokio::test]
async fn test_responses_carry_request_id_and_no_store() {
    let app = test_app();

    let response = app.router.oneshot(get("/")).await.unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .unwrap();
    assert_eq!(request_id.len(), 36);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[tokio::test]
async fn test_create_user_returns_created_and_echoes_fields() {
    let app = test_app_with_table().await;

    let response = app
        .router
        .oneshot(post_json("/users/create", &alice()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"], alice());
    assert!(json["timestamp"].is_string());
}

/// The handler only inserts: a missing table is reported, not created.
#[tokio::test]
async fn test_create_user_without_table_returns_bad_request() {
    let app = test_app();
    assert!(!app.state.readiness.is_ready());

    let response = app
        .router
        .clone()
        .oneshot(post_json("/users/create", &alice()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("failed to create user: "));
    assert!(!app.state.readiness.is_ready());

    let response = app.router.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_create_same_user_twice_succeeds() {
    let app = test_app_with_table().await;

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/users/create", &alice()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_create_user_database_unreachable_returns_bad_request() {
    let app = unreachable_app();

    let response = app
        .router
        .oneshot(post_json("/users/create", &alice()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("failed to create user: "));
    assert!(json["timestamp"].is_string());
    assert!(!app.state.readiness.is_ready());
}

/// Missing fields are rejected by the extractor before the handler runs.
#[tokio::test]
async fn test_create_user_missing_field_rejected() {
    let app = test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/users/create",
            &json!({"username": "alice", "password": "pw1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_ready_unavailable_before_gate() {
    let app = unreachable_app();

    let response = app.router.oneshot(get("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json, json!({"status": "error", "ready": false}));
}

#[tokio::test]
async fn test_ready_after_gate_succeeds() {
    let app = test_app();
    let policy = StartupPolicy {
        attempts: RetryPolicy::new(3, std::time::Duration::ZERO),
        probe: RetryPolicy::new(1, std::time::Duration::ZERO),
    };

    let outcome = run_gate(&app.state.db, &policy, &app.state.readiness).await;
    assert!(outcome.is_ready());

    let response = app.router.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, json!({"status": "success", "ready": true}));
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let app = test_app();

    let response = app.router.oneshot(get("/users")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
