//! Weather API client for Open-Meteo
//!
//! One forecast request per call, with current conditions and a daily
//! precipitation / max temperature series. Fields missing from the response
//! fall back to fixed defaults so the risk model always has inputs.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::DisasterApiError;
use crate::models::WeatherSnapshot;
use crate::weather::WeatherProvider;

const CURRENT_FIELDS: &str = "temperature_2m,precipitation";
const DAILY_FIELDS: &str = "precipitation_sum,temperature_2m_max";
const TIMEZONE: &str = "IST";

/// Used when the response carries no current temperature
pub const DEFAULT_CURRENT_TEMPERATURE: f64 = 25.0;
/// Used when the response carries no daily precipitation series
pub const DEFAULT_PRECIPITATION_DAILY: [f64; 3] = [0.0, 0.0, 0.0];

/// Forecast response from the Open-Meteo API, reduced to the fields we request
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

/// Current conditions block
#[derive(Debug, Default, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
}

/// Daily forecast block; Open-Meteo uses `null` for days it has no value for
#[derive(Debug, Default, Deserialize)]
pub struct DailyData {
    #[serde(rename = "precipitation_sum")]
    pub precipitation: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Option<Vec<Option<f64>>>,
}

impl ForecastResponse {
    /// Convert to a snapshot, filling in defaults for anything absent
    #[must_use]
    pub fn into_snapshot(self) -> WeatherSnapshot {
        let current = self.current.unwrap_or_default();
        let daily = self.daily.unwrap_or_default();

        let current_temperature = current.temperature.unwrap_or(DEFAULT_CURRENT_TEMPERATURE);

        let precipitation_daily = daily
            .precipitation
            .map(|series| series.into_iter().flatten().collect())
            .unwrap_or_else(|| DEFAULT_PRECIPITATION_DAILY.to_vec());

        let max_temperature_daily = daily
            .temperature_max
            .map(|series| series.into_iter().flatten().collect())
            .unwrap_or_else(|| vec![current_temperature]);

        WeatherSnapshot {
            current_temperature,
            current_precipitation: current.precipitation.unwrap_or(0.0),
            precipitation_daily,
            max_temperature_daily,
        }
    }
}

/// Open-Meteo forecast client
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    forecast_url: String,
    forecast_days: u8,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self, DisasterApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("india-disaster-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DisasterApiError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            forecast_url: format!("{}/forecast", config.base_url.trim_end_matches('/')),
            forecast_days: config.forecast_days,
        })
    }

    fn request_url(&self, latitude: f64, longitude: f64) -> Result<Url, DisasterApiError> {
        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", TIMEZONE.to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ];
        Url::parse_with_params(&self.forecast_url, &params)
            .map_err(|e| DisasterApiError::config(format!("Invalid weather API URL: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, DisasterApiError> {
        let url = self.request_url(latitude, longitude)?;
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Weather request failed after {:.3}s: {}", start_time.elapsed().as_secs_f64(), e);
            DisasterApiError::weather_unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather API returned HTTP {}", status.as_u16());
            return Err(DisasterApiError::weather_unavailable(format!(
                "upstream returned HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read weather response body: {}", e);
            DisasterApiError::weather_unavailable(e.to_string())
        })?;

        let forecast: ForecastResponse = serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to parse Open-Meteo forecast response: {}", e);
            DisasterApiError::computation(format!("unexpected weather payload: {e}"))
        })?;

        info!(
            "Retrieved forecast for {:.4}, {:.4} in {:.3}s",
            latitude,
            longitude,
            start_time.elapsed().as_secs_f64()
        );

        Ok(forecast.into_snapshot())
    }
}
