use std::sync::Arc;

use anyhow::{Context, Result};
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Router};
use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::AppConfig;
use crate::error::DisasterApiError;
use crate::predict::PredictionService;
use crate::regions::REGIONS;
use crate::weather::OpenMeteoClient;

/// Router with CORS, request tracing and the whole-request timeout applied
pub fn app(state: Arc<AppState>, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let seconds = config.server.request_timeout_seconds;
    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(move |err: BoxError| async move {
            middleware_error(err, seconds)
        }))
        .timeout(config.server.request_timeout());

    api::router(state)
        .layer(timeout)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Errors surfacing from the middleware stack, in the same JSON shape as handler errors
fn middleware_error(err: BoxError, seconds: u64) -> Response {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded {}s deadline", seconds);
        DisasterApiError::RequestTimeout { seconds }.into_response()
    } else {
        DisasterApiError::computation(err.to_string()).into_response()
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let provider = OpenMeteoClient::new(&config.weather)?;
    let service = PredictionService::new(Arc::new(provider), &REGIONS, config.bulk.clone());
    let app = app(Arc::new(AppState { service }), &config);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Disaster prediction API running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
