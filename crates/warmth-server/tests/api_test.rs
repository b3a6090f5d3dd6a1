use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use warmth_core::clock::ManualClock;
use warmth_core::config::WarmthConfig;
use warmth_scoring::ScoringService;
use warmth_server::{create_router, AppState};
use warmth_storage::StorageEngine;

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_750_000_000_000).unwrap()
}

fn app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at(t0()));
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    let service = ScoringService::new(storage, clock.clone(), &WarmthConfig::default());
    (create_router(AppState::new(service)), clock)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
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

#[tokio::test]
async fn health_reports_version() {
    let (app, _) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn create_read_and_delete_contact() {
    let (app, clock) = app();

    let (status, body) = send(&app, "POST", "/contacts/c-1/warmth", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 100.0);
    assert_eq!(body["mode"], "medium");
    assert_eq!(body["band"], "hot");

    clock.advance(Duration::days(9));
    let (status, body) = send(&app, "GET", "/contacts/c-1/warmth", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["band"], "cool");
    assert!(body["score"].as_f64().unwrap() < 50.0);

    let (status, _) = send(&app, "DELETE", "/contacts/c-1/warmth", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, "GET", "/contacts/c-1/warmth", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["retryable"], false);
}

#[tokio::test]
async fn create_with_options_and_duplicate() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/contacts/c-1/warmth",
        Some(json!({ "mode": "slow", "score": 42.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mode"], "slow");
    assert_eq!(body["band"], "cool");

    let (status, body) = send(&app, "POST", "/contacts/c-1/warmth", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn malformed_create_body_is_rejected() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        "POST",
        "/contacts/c-1/warmth",
        Some(json!({ "mode": "fast", "score": "forty" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let request = Request::builder()
        .method("POST")
        .uri("/contacts/c-1/warmth")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was created along the way.
    let (status, _) = send(&app, "GET", "/contacts/c-1/warmth", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_mode_keeps_score_continuous() {
    let (app, clock) = app();
    send(&app, "POST", "/contacts/c-1/warmth", None).await;
    clock.advance(Duration::days(2));

    let (status, body) = send(
        &app,
        "PATCH",
        "/contacts/c-1/warmth/mode",
        Some(json!({ "mode": "fast" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode_before"], "medium");
    assert_eq!(body["mode_after"], "fast");
    assert_eq!(body["score_before"], body["score_after"]);

    let (_, mode) = send(&app, "GET", "/contacts/c-1/warmth/mode", None).await;
    assert_eq!(mode["current_mode"], "fast");
    assert_eq!(mode["current_score"], body["score_after"]);

    let (_, changes) = send(&app, "GET", "/contacts/c-1/warmth/mode-changes", None).await;
    assert_eq!(changes.as_array().unwrap().len(), 1);
    assert_eq!(changes[0]["to_mode"], "fast");
}

#[tokio::test]
async fn bad_mode_values_are_validation_errors() {
    let (app, _) = app();
    send(&app, "POST", "/contacts/c-1/warmth", None).await;

    for mode in ["glacial", "test"] {
        let (status, body) = send(
            &app,
            "PATCH",
            "/contacts/c-1/warmth/mode",
            Some(json!({ "mode": mode })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{mode}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
    let (_, changes) = send(&app, "GET", "/contacts/c-1/warmth/mode-changes", None).await;
    assert!(changes.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn interaction_hook_boosts_and_ignores_backdated() {
    let (app, clock) = app();
    send(&app, "POST", "/contacts/c-1/warmth", Some(json!({ "score": 50.0 }))).await;
    let now = clock.advance(Duration::days(1));

    let (status, body) = send(
        &app,
        "POST",
        "/contacts/c-1/warmth/interactions",
        Some(json!({
            "occurred_at": now.to_rfc3339_opts(SecondsFormat::Millis, true),
            "channel": "call",
            "direction": "inbound",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], true);
    let before = body["score_before"].as_f64().unwrap();
    let after = body["score_after"].as_f64().unwrap();
    assert!((after - before - 7.0).abs() < 1e-9);

    let old = now - Duration::days(30);
    let (status, body) = send(
        &app,
        "POST",
        "/contacts/c-1/warmth/interactions",
        Some(json!({
            "occurred_at": old.to_rfc3339(),
            "channel": "meeting",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applied"], false);
}

#[tokio::test]
async fn malformed_interaction_is_rejected() {
    let (app, _) = app();
    send(&app, "POST", "/contacts/c-1/warmth", None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/contacts/c-1/warmth/interactions",
        Some(json!({ "occurred_at": "yesterday", "channel": "email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        "/contacts/c-1/warmth/interactions",
        Some(json!({ "occurred_at": t0().to_rfc3339(), "channel": "pigeon" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn consistency_and_forecast() {
    let (app, _) = app();
    send(&app, "POST", "/contacts/c-1/warmth", None).await;

    let (status, report) = send(&app, "GET", "/contacts/c-1/warmth/consistency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["consistent"], true);

    let (status, forecast) = send(&app, "GET", "/contacts/c-1/warmth/forecast?target=50", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!((forecast["days"].as_f64().unwrap() - 8.06).abs() < 0.01);

    let (_, never) = send(&app, "GET", "/contacts/c-1/warmth/forecast?target=0", None).await;
    assert!(never["days"].is_null());

    let (status, _) = send(&app, "GET", "/contacts/c-1/warmth/forecast", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalogues_and_summary() {
    let (app, _) = app();

    let (_, modes) = send(&app, "GET", "/warmth/modes", None).await;
    assert_eq!(modes["default_mode"], "medium");
    let names: Vec<&str> = modes["modes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["mode"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["slow", "medium", "fast"]);

    let (_, bands) = send(&app, "GET", "/warmth/bands", None).await;
    assert_eq!(bands[0], json!({ "band": "hot", "min_score": 75.0 }));
    assert_eq!(bands.as_array().unwrap().len(), 4);

    send(&app, "POST", "/contacts/a/warmth", Some(json!({ "score": 80.0 }))).await;
    send(&app, "POST", "/contacts/b/warmth", Some(json!({ "score": 20.0 }))).await;
    let (_, summary) = send(&app, "GET", "/warmth/summary", None).await;
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["average_score"], 50.0);
}
