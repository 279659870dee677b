use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::json;
use tracing::warn;

use crate::{
    DisasterApiError,
    models::{DisasterKind, Region, RiskAssessment, RiskLevel},
    predict::PredictionService,
    risk::round_to,
};

const OPERATIONAL: &str = "✅ OPERATIONAL";

pub struct AppState {
    pub service: PredictionService,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub regions: usize,
}

/// Wire form of a [`RiskAssessment`]; rounding happens here and nowhere else.
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub region: String,
    pub timestamp: DateTime<Utc>,
    pub primary_disaster: DisasterKind,
    pub risk_level: RiskLevel,
    pub flood_risk: f64,
    pub heat_risk: f64,
    pub rainfall_72h_mm: f64,
    pub max_temperature: f64,
    pub current_temperature: f64,
    pub alert_text: String,
}

impl From<&RiskAssessment> for PredictionResponse {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            region: assessment.region.clone(),
            timestamp: assessment.generated_at,
            primary_disaster: assessment.primary_disaster,
            risk_level: assessment.risk_level,
            flood_risk: round_to(assessment.flood_risk, 2),
            heat_risk: round_to(assessment.heat_risk, 2),
            rainfall_72h_mm: round_to(assessment.rainfall_72h_mm, 1),
            max_temperature: round_to(assessment.max_temperature, 1),
            current_temperature: round_to(assessment.current_temperature, 1),
            alert_text: assessment.alert_text.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum BatchSlot {
    Prediction(PredictionResponse),
    Failed { error: String },
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub total: usize,
    /// Serialized as a JSON object keyed by region, in table order
    #[serde(serialize_with = "ordered_map")]
    pub predictions: Vec<(String, BatchSlot)>,
}

fn ordered_map<S: Serializer>(entries: &[(String, BatchSlot)], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|(name, slot)| (name, slot)))
}

impl IntoResponse for DisasterApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            DisasterApiError::RegionNotFound { .. } => StatusCode::NOT_FOUND,
            DisasterApiError::WeatherUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DisasterApiError::RequestTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            DisasterApiError::InternalComputation { .. } | DisasterApiError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            DisasterApiError::RegionNotFound { region } => json!({
                "error": self.user_message(),
                "region": region,
            }),
            _ => json!({
                "error": self.user_message(),
                "detail": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_status))
        .route("/health", get(get_status))
        .route("/regions", get(get_regions))
        .route("/predict/{region}", get(get_prediction))
        .route("/all", get(get_all_predictions))
        .with_state(state)
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: OPERATIONAL.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: crate::VERSION.to_string(),
        regions: state.service.regions().len(),
    })
}

async fn get_regions(State(state): State<Arc<AppState>>) -> Json<Vec<Region>> {
    Json(state.service.regions().all().to_vec())
}

async fn get_prediction(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Json<PredictionResponse>, DisasterApiError> {
    let assessment = state.service.predict(&region).await.inspect_err(|e| {
        warn!("Prediction for '{}' failed: {}", region, e);
    })?;
    Ok(Json(PredictionResponse::from(&assessment)))
}

async fn get_all_predictions(State(state): State<Arc<AppState>>) -> Json<BatchResponse> {
    let predictions: Vec<(String, BatchSlot)> = state
        .service
        .predict_batch()
        .await
        .into_iter()
        .map(|(name, result)| {
            let slot = match result {
                Ok(assessment) => BatchSlot::Prediction(PredictionResponse::from(&assessment)),
                Err(e) => BatchSlot::Failed {
                    error: e.to_string(),
                },
            };
            (name, slot)
        })
        .collect();

    Json(BatchResponse {
        total: predictions.len(),
        predictions,
    })
}
