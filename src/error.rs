//! Error types and handling for the disaster prediction service

use thiserror::Error;

/// Main error type for the disaster prediction service
#[derive(Error, Debug)]
pub enum DisasterApiError {
    /// The requested region is not in the region table
    #[error("Region {region} not found")]
    RegionNotFound { region: String },

    /// Upstream weather provider failed, returned a non-success status or timed out
    #[error("Weather API failed: {message}")]
    WeatherUnavailable { message: String },

    /// Upstream payload had a shape the risk model cannot work with
    #[error("Computation error: {message}")]
    InternalComputation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The whole request ran past the server's deadline
    #[error("Request timed out after {seconds}s")]
    RequestTimeout { seconds: u64 },
}

impl DisasterApiError {
    /// Create a new region-not-found error
    pub fn region_not_found<S: Into<String>>(region: S) -> Self {
        Self::RegionNotFound {
            region: region.into(),
        }
    }

    /// Create a new weather-unavailable error
    pub fn weather_unavailable<S: Into<String>>(message: S) -> Self {
        Self::WeatherUnavailable {
            message: message.into(),
        }
    }

    /// Create a new computation error
    pub fn computation<S: Into<String>>(message: S) -> Self {
        Self::InternalComputation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DisasterApiError::RegionNotFound { region } => format!("Region {region} not found"),
            DisasterApiError::WeatherUnavailable { .. } => {
                "Weather data is currently unavailable. Please try again later.".to_string()
            }
            DisasterApiError::InternalComputation { .. } => {
                "Unable to compute a risk assessment from the weather data received.".to_string()
            }
            DisasterApiError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            DisasterApiError::RequestTimeout { .. } => {
                "The request took too long to complete. Please try again later.".to_string()
            }
        }
    }
}
