//! India disaster risk API
//!
//! Fetches short-term forecasts from Open-Meteo for Indian states and union
//! territories and classifies each into a flood or heatwave risk tier.

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod predict;
pub mod regions;
pub mod risk;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::DisasterApiError;
pub use models::{DisasterKind, Region, RiskAssessment, RiskLevel, WeatherSnapshot};
pub use predict::PredictionService;
pub use regions::{REGIONS, RegionTable};
pub use weather::{OpenMeteoClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DisasterApiError>;
