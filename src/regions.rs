//! Region table and name resolution
//!
//! The table is built once on first use and never mutated. Its order is the
//! canonical order used by bulk prediction.

use std::sync::LazyLock;

use tracing::debug;

use crate::error::DisasterApiError;
use crate::models::Region;

const REGION_COORDINATES: &[(&str, f64, f64)] = &[
    ("Andhra Pradesh", 15.9129, 79.7400),
    ("Arunachal Pradesh", 28.2180, 94.7278),
    ("Assam", 26.2006, 92.9376),
    ("Bihar", 25.0961, 85.3131),
    ("Chhattisgarh", 21.2787, 81.8661),
    ("Goa", 15.2993, 73.8243),
    ("Gujarat", 22.2587, 71.1924),
    ("Haryana", 29.0588, 77.0745),
    ("Himachal Pradesh", 31.7433, 77.1205),
    ("Jharkhand", 23.6102, 85.2799),
    ("Karnataka", 15.3173, 75.7139),
    ("Kerala", 10.8505, 76.2711),
    ("Madhya Pradesh", 22.9375, 78.6553),
    ("Maharashtra", 19.7515, 75.7139),
    ("Manipur", 24.6637, 93.9063),
    ("Meghalaya", 25.4670, 91.3662),
    ("Mizoram", 23.1815, 92.9789),
    ("Nagaland", 26.1584, 94.5624),
    ("Odisha", 20.9517, 85.0985),
    ("Punjab", 31.5497, 74.3436),
    ("Rajasthan", 27.0238, 74.2179),
    ("Sikkim", 27.5330, 88.5122),
    ("Tamil Nadu", 11.1271, 78.6569),
    ("Telangana", 18.1124, 79.0193),
    ("Tripura", 23.7957, 91.2868),
    ("Uttar Pradesh", 26.8467, 80.9462),
    ("Uttarakhand", 30.0668, 79.0193),
    ("West Bengal", 24.3745, 88.4631),
    ("Andaman & Nicobar", 11.7401, 92.6586),
    ("Chandigarh", 30.7333, 76.7794),
    ("Dadra & Nagar Haveli", 20.2840, 73.4054),
    ("Daman & Diu", 20.7276, 72.8479),
    ("Delhi", 28.7041, 77.1025),
    ("Jammu & Kashmir", 33.7782, 76.5769),
    ("Ladakh", 34.2268, 77.5619),
    ("Lakshadweep", 12.2381, 73.2383),
    ("Puducherry", 12.0657, 79.8711),
];

/// Process-wide table of Indian states and union territories
pub static REGIONS: LazyLock<RegionTable> = LazyLock::new(|| {
    RegionTable::new(
        REGION_COORDINATES
            .iter()
            .map(|(name, lat, lon)| Region::new(*name, *lat, *lon))
            .collect(),
    )
});

/// Ordered, immutable collection of regions keyed by display name
#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    #[must_use]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn all(&self) -> &[Region] {
        &self.regions
    }

    /// The first `n` regions in table order (fewer if the table is shorter)
    #[must_use]
    pub fn first(&self, n: usize) -> &[Region] {
        &self.regions[..n.min(self.regions.len())]
    }

    /// Resolve free text to a region: exact name first, then a
    /// case-insensitive match returning the canonical entry.
    pub fn resolve(&self, input: &str) -> Result<&Region, DisasterApiError> {
        let wanted = input.trim();

        if let Some(region) = self.regions.iter().find(|r| r.name == wanted) {
            return Ok(region);
        }

        let lowered = wanted.to_lowercase();
        if let Some(region) = self.regions.iter().find(|r| r.name.to_lowercase() == lowered) {
            debug!("Resolved '{}' case-insensitively to '{}'", input, region.name);
            return Ok(region);
        }

        Err(DisasterApiError::region_not_found(input))
    }
}
