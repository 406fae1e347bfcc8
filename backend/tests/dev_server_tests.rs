//! Development server integration tests
//!
//! Drives the router in-process with `oneshot`:
//! - Simulated probability responses decode into the shared model
//! - Malformed requests are answered with an error document
//! - Health status document

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use spacerain_dev_server::{create_app, AppState, Config};
use spacerain_shared::{render_results, AnalysisResponse, ConditionResult};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState {
        config: Arc::new(Config::defaults().unwrap()),
    })
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/calculate-probability")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_simulated_response_covers_requested_conditions() {
    let response = app()
        .oneshot(post_json(
            r#"{"date":"2025-06-01","time":"14:00","lat":-33.4489,"lon":-70.6693,"conditions":["rain","temperature","wind"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["location"], "-33.4489, -70.6693");
    assert_eq!(body["date"], "2025-06-01");
    assert_eq!(body["time"], "14:00");
    assert!(body["probabilities"]["wind"]["maxSpeed"].is_number());
    assert!(body["probabilities"]["wind"]["avgSpeed"].is_number());
    assert!(body["probabilities"]["rain"]["maxRecorded"].is_number());

    let decoded: AnalysisResponse = serde_json::from_value(body).unwrap();
    assert_eq!(decoded.probabilities.len(), 3);
    assert!(matches!(decoded.get("temperature"), Some(ConditionResult::Temperature(_))));
    assert!(matches!(decoded.get("rain"), Some(ConditionResult::Probability(_))));

    let cards = render_results(&decoded);
    assert!(cards.iter().all(|card| !card.is_degraded()));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let response = app().oneshot(post_json("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unparseable_date_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            r#"{"date":"June first","time":"14:00","lat":0.0,"lon":0.0,"conditions":["rain"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_time_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            r#"{"date":"2025-06-01","time":"14: 5","lat":0.0,"lon":0.0,"conditions":["rain"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_out_of_range_coordinate_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            r#"{"date":"2025-06-01","time":"14:00","lat":91.0,"lon":0.0,"conditions":["rain"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("91"));
}

#[tokio::test]
async fn test_empty_conditions_is_bad_request() {
    let response = app()
        .oneshot(post_json(
            r#"{"date":"2025-06-01","time":"14:00","lat":0.0,"lon":0.0,"conditions":[]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_mode() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "development");
}
