//! Weather snapshot model

use serde::{Deserialize, Serialize};

/// Current conditions plus the daily forecast series for one location.
///
/// Lives for a single request. Daily series are ordered by days ahead,
/// starting with today.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Current temperature in Celsius
    pub current_temperature: f64,
    /// Current precipitation in mm
    pub current_precipitation: f64,
    /// Daily precipitation sums in mm
    pub precipitation_daily: Vec<f64>,
    /// Daily maximum temperatures in Celsius
    pub max_temperature_daily: Vec<f64>,
}
