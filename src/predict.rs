//! Prediction orchestration
//!
//! Resolves a region, fetches its weather, runs the risk model and attaches
//! the alert text. Bulk runs fan out over the head of the region table with a
//! bounded number of upstream calls in flight.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::alerts;
use crate::config::BulkConfig;
use crate::error::DisasterApiError;
use crate::models::{Region, RiskAssessment};
use crate::regions::RegionTable;
use crate::risk::{self, RiskInputs};
use crate::weather::WeatherProvider;

/// Outcome of one slot in a bulk run
pub type BatchEntry = (String, Result<RiskAssessment, DisasterApiError>);

pub struct PredictionService {
    provider: Arc<dyn WeatherProvider>,
    regions: &'static RegionTable,
    bulk: BulkConfig,
}

impl PredictionService {
    #[must_use]
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        regions: &'static RegionTable,
        bulk: BulkConfig,
    ) -> Self {
        Self {
            provider,
            regions,
            bulk,
        }
    }

    #[must_use]
    pub fn regions(&self) -> &'static RegionTable {
        self.regions
    }

    /// Predict for a free-text region name
    #[instrument(skip(self))]
    pub async fn predict(&self, region_name: &str) -> Result<RiskAssessment, DisasterApiError> {
        let region = self.regions.resolve(region_name)?;
        self.predict_region(region).await
    }

    /// Predict for an already resolved region
    pub async fn predict_region(&self, region: &Region) -> Result<RiskAssessment, DisasterApiError> {
        debug!("Fetching weather for {} ({})", region.name, region.format_coordinates());
        let snapshot = self
            .provider
            .fetch(region.latitude, region.longitude)
            .await?;

        let inputs = RiskInputs::from_snapshot(&snapshot)?;
        let scores = risk::assess(inputs);
        let alert_text = alerts::alert_text(scores.primary_disaster, scores.risk_level, &region.name);

        info!(
            "{}: {} {} (flood {:.2}, heat {:.2})",
            region.name, scores.primary_disaster, scores.risk_level, scores.flood_risk, scores.heat_risk
        );

        Ok(RiskAssessment {
            region: region.name.clone(),
            primary_disaster: scores.primary_disaster,
            risk_level: scores.risk_level,
            flood_risk: scores.flood_risk,
            heat_risk: scores.heat_risk,
            rainfall_72h_mm: inputs.rainfall_72h_mm,
            max_temperature: inputs.max_temperature,
            current_temperature: snapshot.current_temperature,
            alert_text,
            generated_at: Utc::now(),
        })
    }

    /// Predict for the first `bulk.limit` regions, in table order.
    ///
    /// Each slot holds its own result; one failing region does not abort the
    /// others. Regions beyond the limit are never fetched.
    #[instrument(skip(self))]
    pub async fn predict_batch(&self) -> Vec<BatchEntry> {
        let regions = self.regions.first(self.bulk.limit);
        info!(
            "Running bulk prediction over {} regions ({} concurrent)",
            regions.len(),
            self.bulk.concurrency
        );

        let results: Vec<BatchEntry> = stream::iter(regions.iter().cloned())
            .map(|region| async move {
                let result = self.predict_region(&region).await;
                (region.name, result)
            })
            .buffered(self.bulk.concurrency.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} bulk predictions failed", failed, results.len());
        }
        results
    }
}
