//! Region model for geographic coordinates

use serde::{Deserialize, Serialize};

/// An Indian state or union territory, the unit of prediction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Region {
    /// Canonical display name (e.g. "Tamil Nadu")
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Region {
    /// Create a new region
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Format region as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
