#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use fms_api::config::{FmsMode, ServerConfig};
use fms_api::router::build_app_router;
use fms_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        mode: FmsMode::Lan,
        db_max_connections: 5,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers (go through the API so every test exercises the stack)
// ---------------------------------------------------------------------------

/// Create an event and return its id.
pub async fn create_event(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/events",
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_team(pool: &PgPool, event_id: i64, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/teams"),
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}

pub async fn create_participant(pool: &PgPool, event_id: i64, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/participants"),
        serde_json::json!({"name": name, "weight": 72.5}),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a fight and return the raw response so callers can assert on
/// failures too.
pub async fn post_fight(pool: &PgPool, event_id: i64, a: i64, b: i64, order: i64) -> Response<Body> {
    post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/fights"),
        serde_json::json!({
            "participant_a_id": a,
            "participant_b_id": b,
            "order_number": order,
        }),
    )
    .await
}

pub async fn create_fight(pool: &PgPool, event_id: i64, a: i64, b: i64, order: i64) -> i64 {
    let response = post_fight(pool, event_id, a, b, order).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Force a fight's status directly in the store, standing in for live
/// control.
pub async fn set_fight_status(pool: &PgPool, fight_id: i64, status_id: i16) {
    sqlx::query("UPDATE fights SET status_id = $2 WHERE id = $1")
        .bind(fight_id)
        .bind(status_id)
        .execute(pool)
        .await
        .unwrap();
}

/// `(fight_id, order_number)` pairs of an event's card, in running order.
pub async fn card(pool: &PgPool, event_id: i64) -> Vec<(i64, i64)> {
    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/fights"),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["id"].as_i64().unwrap(),
                f["order_number"].as_i64().unwrap(),
            )
        })
        .collect()
}
