//! Data models for the disaster prediction service
//!
//! This module contains the core domain models organized by concern:
//! - Region: an Indian state or union territory and its coordinates
//! - Weather: the per-request weather snapshot taken from the upstream API
//! - Assessment: the derived risk classification and its scores

pub mod assessment;
pub mod region;
pub mod weather;

// Re-export all public types for convenient access
pub use assessment::{DisasterKind, RiskAssessment, RiskLevel};
pub use region::Region;
pub use weather::WeatherSnapshot;
