//! `CropCast` - crop viability recommendations from temperature forecasts
//!
//! This library fetches multi-day daily temperature extremes from the
//! Open-Meteo forecast API and filters a static table of crop-growing
//! rules against them.

pub mod api;
pub mod config;
pub mod crops;
pub mod error;
pub mod models;
pub mod recommend;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::CropCastConfig;
pub use crops::{CropRule, CropTable};
pub use error::CropCastError;
pub use models::{Coordinate, DailyForecast};
pub use recommend::{Recommendation, recommend};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CropCastError>;
