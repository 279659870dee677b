//! Risk assessment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The disaster a region is most exposed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisasterKind {
    Flood,
    Heatwave,
}

/// Severity tier, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl fmt::Display for DisasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisasterKind::Flood => write!(f, "FLOOD"),
            DisasterKind::Heatwave => write!(f, "HEATWAVE"),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Extreme => write!(f, "EXTREME"),
        }
    }
}

/// Full-precision outcome of one region prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Canonical region name
    pub region: String,
    pub primary_disaster: DisasterKind,
    pub risk_level: RiskLevel,
    /// Normalized flood score in [0, 1]
    pub flood_risk: f64,
    /// Normalized heat score in [0, 1]
    pub heat_risk: f64,
    /// Precipitation over the first three forecast days, mm
    pub rainfall_72h_mm: f64,
    /// Peak forecast temperature over the window, Celsius
    pub max_temperature: f64,
    pub current_temperature: f64,
    pub alert_text: String,
    pub generated_at: DateTime<Utc>,
}
