use anyhow::Result;
use india_disaster_api::{AppConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;

    tracing::info!(
        "Starting india-disaster-api v{} (forecast days: {}, bulk: {} regions x{})",
        india_disaster_api::VERSION,
        config.weather.forecast_days,
        config.bulk.limit,
        config.bulk.concurrency
    );

    web::run(config).await
}
