//! Daily forecast model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Multi-day temperature extremes for one coordinate, in day order.
///
/// Minimums are fetched alongside maximums but take no part in crop
/// filtering, which only looks at the daily maximum.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// Forecast dates, one entry per day
    pub days: Vec<NaiveDate>,
    /// Daily maximum temperature in Celsius
    pub temperature_max: Vec<f64>,
    /// Daily minimum temperature in Celsius
    pub temperature_min: Vec<f64>,
}

impl DailyForecast {
    /// Create a new forecast
    #[must_use]
    pub fn new(
        days: Vec<NaiveDate>,
        temperature_max: Vec<f64>,
        temperature_min: Vec<f64>,
    ) -> Self {
        Self {
            days,
            temperature_max,
            temperature_min,
        }
    }

    /// Number of forecast days
    #[must_use]
    pub fn len(&self) -> usize {
        self.temperature_max.len()
    }

    /// Whether the forecast holds no days at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temperature_max.is_empty()
    }
}
