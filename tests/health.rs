use axum::{body::to_bytes, http::Request};
use racereplay_rs::{app, config::Config, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

#[tokio::test]
async fn health_returns_ok_with_cache_sizes() {
    let response = app(AppState::new(Config::default()))
        .oneshot(
            Request::builder()
                .uri("/health")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json.get("status").and_then(Value::as_str), Some("ok"));
    assert_eq!(json.get("activities").and_then(Value::as_u64), Some(0));
    assert_eq!(json.get("races").and_then(Value::as_u64), Some(0));
}
