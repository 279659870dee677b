use async_trait::async_trait;

use crate::error::DisasterApiError;
use crate::models::WeatherSnapshot;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Source of current conditions and the short-term daily forecast.
///
/// Implementations must turn every upstream failure into a
/// [`DisasterApiError`]; nothing from the transport leaks past this seam.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, DisasterApiError>;
}
