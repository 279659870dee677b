//! Heuristic flood / heatwave risk model
//!
//! Scores are normalized to [0, 1]. Flood risk saturates at 150 mm of rain
//! over the first three forecast days; heat risk starts above 35 °C and
//! saturates 8 °C later, at 43 °C. The larger score picks the disaster and
//! the tier.

use crate::error::DisasterApiError;
use crate::models::{DisasterKind, RiskLevel, WeatherSnapshot};

/// Number of leading forecast days both series are reduced over
pub const RISK_WINDOW_DAYS: usize = 3;

const FLOOD_SATURATION_MM: f64 = 150.0;
const HEAT_THRESHOLD_C: f64 = 35.0;
const HEAT_SPAN_C: f64 = 8.0;

const EXTREME_ABOVE: f64 = 0.80;
const HIGH_ABOVE: f64 = 0.50;
const MEDIUM_ABOVE: f64 = 0.20;

/// The two figures the model reads from a forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub rainfall_72h_mm: f64,
    pub max_temperature: f64,
}

/// Model output, full precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScores {
    pub flood_risk: f64,
    pub heat_risk: f64,
    pub primary_disaster: DisasterKind,
    pub risk_level: RiskLevel,
}

impl RiskInputs {
    /// Reduce the daily series over the risk window.
    ///
    /// A series shorter than the window is used as-is. An empty
    /// max-temperature series has no peak and is rejected.
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Result<Self, DisasterApiError> {
        let rainfall_72h_mm = snapshot
            .precipitation_daily
            .iter()
            .take(RISK_WINDOW_DAYS)
            .sum();

        let max_temperature = snapshot
            .max_temperature_daily
            .iter()
            .take(RISK_WINDOW_DAYS)
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| DisasterApiError::computation("daily max temperature series is empty"))?;

        Ok(Self {
            rainfall_72h_mm,
            max_temperature,
        })
    }
}

#[must_use]
pub fn flood_risk(rainfall_72h_mm: f64) -> f64 {
    if rainfall_72h_mm <= 0.0 {
        return 0.0;
    }
    (rainfall_72h_mm / FLOOD_SATURATION_MM).clamp(0.0, 1.0)
}

#[must_use]
pub fn heat_risk(max_temperature: f64) -> f64 {
    if max_temperature <= HEAT_THRESHOLD_C {
        return 0.0;
    }
    ((max_temperature - HEAT_THRESHOLD_C) / HEAT_SPAN_C).clamp(0.0, 1.0)
}

/// Flood only wins on a strictly higher score; ties go to heatwave.
#[must_use]
pub fn primary_disaster(flood_risk: f64, heat_risk: f64) -> DisasterKind {
    if flood_risk > heat_risk {
        DisasterKind::Flood
    } else {
        DisasterKind::Heatwave
    }
}

/// Tier boundaries are exclusive: exactly 0.80 is HIGH, not EXTREME.
#[must_use]
pub fn risk_level(max_risk: f64) -> RiskLevel {
    if max_risk > EXTREME_ABOVE {
        RiskLevel::Extreme
    } else if max_risk > HIGH_ABOVE {
        RiskLevel::High
    } else if max_risk > MEDIUM_ABOVE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[must_use]
pub fn assess(inputs: RiskInputs) -> RiskScores {
    let flood = flood_risk(inputs.rainfall_72h_mm);
    let heat = heat_risk(inputs.max_temperature);

    RiskScores {
        flood_risk: flood,
        heat_risk: heat,
        primary_disaster: primary_disaster(flood, heat),
        risk_level: risk_level(flood.max(heat)),
    }
}

/// Round to `places` decimals for presentation, halves to even.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}
