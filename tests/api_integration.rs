//! Integration tests for the HTTP API against a local mock of the Open-Meteo forecast endpoint

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use http_body_util::BodyExt;
use india_disaster_api::{
    AppConfig, OpenMeteoClient, PredictionService, REGIONS,
    api::AppState,
    web,
};
use serde_json::{Value, json};
use tower::ServiceExt;

// Latitudes from the region table, used to pick a canned upstream response
const KERALA: &str = "10.8505";
const RAJASTHAN: &str = "27.0238";
const ASSAM: &str = "26.2006";
const BIHAR: &str = "25.0961";
const GOA: &str = "15.2993";
const PUNJAB: &str = "31.5497";

async fn forecast(
    State(calls): State<Arc<AtomicUsize>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);

    let well_formed = params.get("timezone").map(String::as_str) == Some("IST")
        && params.get("forecast_days").map(String::as_str) == Some("3")
        && params.get("current").map(String::as_str) == Some("temperature_2m,precipitation")
        && params.get("daily").map(String::as_str) == Some("precipitation_sum,temperature_2m_max");
    if !well_formed {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": true, "reason": "bad params"}))).into_response();
    }

    match params.get("latitude").map(String::as_str) {
        Some(KERALA) => Json(json!({
            "current": {"temperature_2m": 27.0, "precipitation": 3.1},
            "daily": {
                "time": ["2026-07-01", "2026-07-02", "2026-07-03"],
                "precipitation_sum": [60.0, 50.0, 45.0],
                "temperature_2m_max": [30.0, 31.0, 29.0]
            }
        }))
        .into_response(),
        Some(RAJASTHAN) => Json(json!({
            "current": {"temperature_2m": 41.2, "precipitation": 0.0},
            "daily": {
                "precipitation_sum": [0.0, 0.0, 0.4],
                "temperature_2m_max": [44.1, 45.3, 43.0]
            }
        }))
        .into_response(),
        Some(ASSAM) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some(BIHAR) => Json(json!({"daily": {"precipitation_sum": "heavy"}})).into_response(),
        Some(GOA) => Json(json!({})).into_response(),
        Some(PUNJAB) => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({})).into_response()
        }
        _ => Json(json!({
            "current": {"temperature_2m": 30.0, "precipitation": 0.0},
            "daily": {
                "precipitation_sum": [10.0, 12.0, 8.0],
                "temperature_2m_max": [33.0, 34.0, 33.5]
            }
        }))
        .into_response(),
    }
}

/// Start the mock upstream on an ephemeral port; returns its base URL and call counter.
async fn spawn_upstream() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1/forecast", get(forecast))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), calls)
}

async fn test_app() -> (Router, Arc<AtomicUsize>) {
    let (base_url, calls) = spawn_upstream().await;

    let mut config = AppConfig::default();
    config.weather.base_url = base_url;
    config.weather.timeout_seconds = 1;

    let provider = OpenMeteoClient::new(&config.weather).unwrap();
    let service = PredictionService::new(Arc::new(provider), &REGIONS, config.bulk.clone());
    let app = web::app(Arc::new(AppState { service }), &config);
    (app, calls)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_reports_region_count() {
    let (app, calls) = test_app().await;

    for uri in ["/", "/health"] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "✅ OPERATIONAL");
        assert_eq!(body["regions"], 37);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_regions_listing() {
    let (app, _) = test_app().await;
    let (status, body) = get_json(app, "/regions").await;

    assert_eq!(status, StatusCode::OK);
    let regions = body.as_array().unwrap();
    assert_eq!(regions.len(), 37);
    assert_eq!(regions[0]["name"], "Andhra Pradesh");
    assert_eq!(regions[11]["latitude"], 10.8505);
}

#[tokio::test]
async fn test_flood_prediction_end_to_end() {
    let (app, calls) = test_app().await;
    let (status, body) = get_json(app, "/predict/kerala").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "Kerala");
    assert_eq!(body["primary_disaster"], "FLOOD");
    assert_eq!(body["risk_level"], "EXTREME");
    assert_eq!(body["flood_risk"], 1.0);
    assert_eq!(body["heat_risk"], 0.0);
    assert_eq!(body["rainfall_72h_mm"], 155.0);
    assert_eq!(body["max_temperature"], 31.0);
    assert!(body["alert_text"].as_str().unwrap().contains("Kerala"));
    assert!(body["timestamp"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_heatwave_prediction_end_to_end() {
    let (app, _) = test_app().await;
    let (status, body) = get_json(app, "/predict/Rajasthan").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["primary_disaster"], "HEATWAVE");
    assert_eq!(body["risk_level"], "EXTREME");
    assert_eq!(body["heat_risk"], 1.0);
    assert_eq!(body["max_temperature"], 45.3);
    assert_eq!(body["rainfall_72h_mm"], 0.4);
}

#[tokio::test]
async fn test_percent_encoded_region_name() {
    let (app, _) = test_app().await;
    let (status, body) = get_json(app, "/predict/tamil%20nadu").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "Tamil Nadu");
    assert_eq!(body["risk_level"], "LOW");
}

#[tokio::test]
async fn test_missing_fields_use_defaults() {
    let (app, _) = test_app().await;
    let (status, body) = get_json(app, "/predict/Goa").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_temperature"], 25.0);
    assert_eq!(body["max_temperature"], 25.0);
    assert_eq!(body["rainfall_72h_mm"], 0.0);
    assert_eq!(body["primary_disaster"], "HEATWAVE");
    assert_eq!(body["risk_level"], "LOW");
}

#[tokio::test]
async fn test_unknown_region_is_404() {
    let (app, calls) = test_app().await;
    let (status, body) = get_json(app, "/predict/Atlantis").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["region"], "Atlantis");
    assert_eq!(body["error"], "Region Atlantis not found");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_503() {
    let (app, _) = test_app().await;
    let (status, body) = get_json(app, "/predict/Assam").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["detail"].as_str().unwrap().contains("HTTP 500"));
}

#[tokio::test]
async fn test_upstream_timeout_is_503() {
    let (app, _) = test_app().await;
    let (status, _) = get_json(app, "/predict/Punjab").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_upstream_payload_is_500() {
    let (app, _) = test_app().await;
    let (status, body) = get_json(app, "/predict/Bihar").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_bulk_prediction_covers_first_ten_regions() {
    let (app, calls) = test_app().await;
    let (status, body) = get_json(app, "/all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(calls.load(Ordering::SeqCst), 10);

    let predictions = body["predictions"].as_object().unwrap();
    assert_eq!(predictions.len(), 10);
    for region in REGIONS.first(10) {
        assert!(predictions.contains_key(&region.name), "missing {}", region.name);
    }
    assert!(!predictions.contains_key("Kerala"));

    assert!(predictions["Assam"]["error"].as_str().unwrap().contains("Weather API failed"));
    assert!(predictions["Bihar"]["error"].is_string());
    assert_eq!(predictions["Goa"]["risk_level"], "LOW");
    assert_eq!(predictions["Andhra Pradesh"]["region"], "Andhra Pradesh");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "https://example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
