//! Crop rule table
//!
//! A static mapping from crop name to an inclusive temperature tolerance
//! band. The table is built once at startup and stays immutable for the
//! process lifetime.

use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::{CropCastError, Result};

/// A named temperature tolerance band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRule {
    /// Crop name as it appears in recommendations
    pub name: String,
    /// Lowest tolerable daily maximum in Celsius
    pub temp_min: f64,
    /// Highest tolerable daily maximum in Celsius
    pub temp_max: f64,
}

impl CropRule {
    /// Create a new rule
    #[must_use]
    pub fn new<S: Into<String>>(name: S, temp_min: f64, temp_max: f64) -> Self {
        Self {
            name: name.into(),
            temp_min,
            temp_max,
        }
    }

    /// Whether a single temperature falls inside the band, bounds inclusive
    #[must_use]
    pub fn tolerates(&self, temperature: f64) -> bool {
        self.temp_min <= temperature && temperature <= self.temp_max
    }

    /// Whether every temperature in the sequence falls inside the band.
    ///
    /// An empty sequence is tolerated vacuously.
    #[must_use]
    pub fn tolerates_all<'a, I>(&self, temperatures: I) -> bool
    where
        I: IntoIterator<Item = &'a f64>,
    {
        temperatures.into_iter().all(|t| self.tolerates(*t))
    }
}

/// Immutable crop rule table with a fixed iteration order
#[derive(Debug, Clone, Deserialize)]
pub struct CropTable {
    crops: Vec<CropRule>,
}

impl CropTable {
    /// Build a table from a list of rules, rejecting invalid bands
    pub fn new(crops: Vec<CropRule>) -> Result<Self> {
        let table = Self { crops };
        table.validate()?;
        Ok(table)
    }

    /// The compiled-in default table.
    ///
    /// Bands are daily-maximum tolerances in Celsius for a temperate
    /// growing climate.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            crops: vec![
                CropRule::new("rice", 20.0, 35.0),
                CropRule::new("wheat", 10.0, 25.0),
                CropRule::new("barley", 8.0, 24.0),
                CropRule::new("soybean", 18.0, 33.0),
                CropRule::new("maize", 18.0, 35.0),
                CropRule::new("tomato", 15.0, 30.0),
                CropRule::new("cucumber", 18.0, 32.0),
                CropRule::new("eggplant", 20.0, 33.0),
                CropRule::new("strawberry", 10.0, 27.0),
                CropRule::new("cabbage", 5.0, 25.0),
                CropRule::new("spinach", 5.0, 23.0),
            ],
        }
    }

    /// Load a table from a TOML rule file.
    ///
    /// The file holds a `crops` array of tables, each with `name`,
    /// `temp_min` and `temp_max`.
    pub fn from_path(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(PathBuf::from(path)).format(config::FileFormat::Toml))
            .build()
            .map_err(|e| {
                CropCastError::config(format!("Failed to read crop rule file '{path}': {e}"))
            })?;

        let table: CropTable = settings.try_deserialize().map_err(|e| {
            CropCastError::config(format!("Failed to parse crop rule file '{path}': {e}"))
        })?;

        table.validate()?;
        Ok(table)
    }

    /// Reject unnamed rules and bands that cannot match anything
    pub fn validate(&self) -> Result<()> {
        for rule in &self.crops {
            if rule.name.is_empty() {
                return Err(CropCastError::config("Crop rule with empty name"));
            }
            if rule.temp_min > rule.temp_max {
                return Err(CropCastError::config(format!(
                    "Crop rule '{}' has temp_min {} above temp_max {}",
                    rule.name, rule.temp_min, rule.temp_max
                )));
            }
        }
        Ok(())
    }

    /// Rules in table order
    #[must_use]
    pub fn rules(&self) -> &[CropRule] {
        &self.crops
    }

    /// Number of rules in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    /// Whether the table holds no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
