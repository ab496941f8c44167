//! `CropCast` server binary

use anyhow::Context;
use cropcast::{AppState, CropCastConfig, CropTable, WeatherClient, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cropcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CropCastConfig::load().context("Failed to load configuration")?;

    tracing::info!("Starting CropCast server");

    let crops = match &config.crops.rules_file {
        Some(path) => CropTable::from_path(path)?,
        None => CropTable::builtin(),
    };
    tracing::info!("Crop table loaded with {} rules", crops.len());

    let weather = WeatherClient::new(&config.weather)?;
    let state = AppState::new(weather, crops);

    web::run(config.server.port, state).await
}
