//! HTTP API for the `CropCast` service

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{Coordinate, CropCastError, CropTable, Recommendation, WeatherClient, recommend};

/// Shared application state: the weather client and the immutable crop table
#[derive(Clone)]
pub struct AppState {
    weather: WeatherClient,
    crops: Arc<CropTable>,
}

impl AppState {
    /// Create the state shared across handlers
    #[must_use]
    pub fn new(weather: WeatherClient, crops: CropTable) -> Self {
        Self {
            weather,
            crops: Arc::new(crops),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/forecast", get(forecast))
        .with_state(state)
}

/// Liveness probe; ignores any query parameters
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fetch the forecast for a coordinate and run the crop filter over it
async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Recommendation>, CropCastError> {
    let location = Coordinate::new(query.lat, query.lon);
    let daily = state.weather.daily_forecast(location).await?;

    let result = recommend(&state.crops, location, &daily);
    tracing::info!(
        "Forecast for {}: {} days, {} of {} crops recommended",
        location.format_coordinates(),
        daily.len(),
        result.recommended.len(),
        state.crops.len()
    );

    Ok(Json(result))
}
