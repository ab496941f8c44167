//! Coordinate model for the requested location

use serde::{Deserialize, Serialize};

/// Geographic coordinate, taken from the request verbatim.
///
/// Values are not range-checked; out-of-range coordinates pass through to
/// the weather API unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Format as a "lat, lon" pair for log output
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}
