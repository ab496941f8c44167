//! Open-Meteo forecast client
//!
//! Issues one GET per request against the Open-Meteo forecast endpoint,
//! asking for daily temperature extremes in a fixed timezone. Failed calls
//! are not retried.

use std::time::Duration;

use reqwest::Client;

use crate::{Coordinate, CropCastError, DailyForecast, Result, config::WeatherConfig};

/// HTTP client for the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    timezone: String,
    forecast_days: u32,
}

impl WeatherClient {
    /// Build a client from configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| CropCastError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timezone: config.timezone.clone(),
            forecast_days: config.forecast_days,
        })
    }

    fn forecast_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min&timezone={}&forecast_days={}",
            self.base_url, coordinate.lat, coordinate.lon, self.timezone, self.forecast_days
        )
    }

    /// Fetch the daily temperature extremes for a coordinate
    pub async fn daily_forecast(&self, coordinate: Coordinate) -> Result<DailyForecast> {
        let url = self.forecast_url(coordinate);
        tracing::debug!("Fetching forecast from {url}");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CropCastError::upstream(format!(
                "Weather API answered {} for {}",
                response.status(),
                coordinate.format_coordinates()
            )));
        }

        let payload: open_meteo::ForecastResponse = response.json().await?;
        tracing::debug!(
            "Open-Meteo resolved grid point {}, {}",
            payload.latitude,
            payload.longitude
        );

        payload.into_daily()
    }
}

/// Open-Meteo API response structures and conversion utilities
mod open_meteo {
    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::{CropCastError, DailyForecast, Result};

    /// Forecast response from the Open-Meteo API
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub daily: Option<DailyData>,
    }

    /// Daily weather data from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Vec<NaiveDate>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f64>>>,
    }

    impl ForecastResponse {
        /// Convert the raw payload into a `DailyForecast`.
        ///
        /// A missing daily block, a missing temperature series, or a null
        /// entry inside one count as a malformed payload.
        pub fn into_daily(self) -> Result<DailyForecast> {
            let daily = self
                .daily
                .ok_or_else(|| CropCastError::payload("Response has no daily block"))?;

            let temperature_max = collect_series(daily.temperature_max, "temperature_2m_max")?;
            let temperature_min = collect_series(daily.temperature_min, "temperature_2m_min")?;

            Ok(DailyForecast::new(
                daily.time,
                temperature_max,
                temperature_min,
            ))
        }
    }

    fn collect_series(series: Option<Vec<Option<f64>>>, field: &str) -> Result<Vec<f64>> {
        series
            .ok_or_else(|| CropCastError::payload(format!("Daily block has no {field} series")))?
            .into_iter()
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| CropCastError::payload(format!("Null value in {field} series")))
    }
}
