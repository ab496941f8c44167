//! Recommendation filter
//!
//! Intersects fetched daily maximum temperatures against each crop's
//! tolerance band and reports the crops that tolerate every forecast day.

use serde::{Deserialize, Serialize};

use crate::{Coordinate, CropTable, DailyForecast};

/// Filter output: the coordinate, the raw daily-maximum sequence, and the
/// names of the crops whose band contains every value in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub location: Coordinate,
    pub forecast: Vec<f64>,
    pub recommended: Vec<String>,
}

/// Run the crop filter for one forecast.
///
/// A crop is recommended when every daily maximum lies inside its band,
/// bounds inclusive. The `forecast` field of the result carries the
/// upstream daily-maximum sequence untransformed.
///
/// An empty forecast trivially satisfies every rule and recommends the
/// whole table; the filter logs a warning when that happens.
#[must_use]
pub fn recommend(
    crops: &CropTable,
    location: Coordinate,
    forecast: &DailyForecast,
) -> Recommendation {
    if forecast.is_empty() {
        tracing::warn!(
            "Empty forecast for {}; every crop matches vacuously",
            location.format_coordinates()
        );
    }

    let recommended = crops
        .rules()
        .iter()
        .filter(|rule| rule.tolerates_all(&forecast.temperature_max))
        .map(|rule| rule.name.clone())
        .collect();

    Recommendation {
        location,
        forecast: forecast.temperature_max.clone(),
        recommended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CropRule;
    use rstest::rstest;
    use serde_json::json;

    fn forecast(maxima: &[f64]) -> DailyForecast {
        let days = (8..8 + maxima.len() as u32)
            .map(|d| format!("2026-08-{d:02}").parse().unwrap())
            .collect();
        let minima = maxima.iter().map(|t| t - 8.0).collect();
        DailyForecast::new(days, maxima.to_vec(), minima)
    }

    fn single_rule_table(temp_min: f64, temp_max: f64) -> CropTable {
        CropTable::new(vec![CropRule::new("test_crop", temp_min, temp_max)]).unwrap()
    }

    #[rstest]
    #[case(15.0, 30.0, true)] // every day inside the band
    #[case(26.0, 35.0, false)] // 20 and 22 fall below the band
    #[case(20.0, 25.0, true)] // both bounds exactly on forecast values
    #[case(21.0, 30.0, false)] // first day sits below temp_min
    #[case(15.0, 24.0, false)] // last day sits above temp_max
    fn test_band_intersection(
        #[case] temp_min: f64,
        #[case] temp_max: f64,
        #[case] matches: bool,
    ) {
        let table = single_rule_table(temp_min, temp_max);
        let result = recommend(&table, Coordinate::new(35.0, 139.0), &forecast(&[20.0, 22.0, 25.0]));
        assert_eq!(result.recommended.contains(&"test_crop".to_string()), matches);
    }

    #[test]
    fn test_forecast_field_is_untransformed() {
        let maxima = [20.0, 22.0, 25.0];
        let result = recommend(
            &CropTable::builtin(),
            Coordinate::new(35.0, 139.0),
            &forecast(&maxima),
        );
        assert_eq!(result.forecast, maxima);
    }

    #[test]
    fn test_empty_forecast_recommends_every_crop() {
        // Vacuous-truth edge case, preserved on purpose: with no days to
        // violate a band, the whole table matches.
        let table = CropTable::builtin();
        let result = recommend(&table, Coordinate::new(35.0, 139.0), &forecast(&[]));

        assert_eq!(result.recommended.len(), table.len());
        assert!(result.forecast.is_empty());
    }

    #[test]
    fn test_recommended_preserves_table_order() {
        let table = CropTable::new(vec![
            CropRule::new("second", 0.0, 50.0),
            CropRule::new("first", 0.0, 50.0),
        ])
        .unwrap();

        let result = recommend(&table, Coordinate::new(0.0, 0.0), &forecast(&[20.0]));
        assert_eq!(result.recommended, vec!["second", "first"]);
    }

    #[test]
    fn test_serialized_shape() {
        let table = single_rule_table(15.0, 30.0);
        let result = recommend(&table, Coordinate::new(35.6895, 139.6917), &forecast(&[20.0]));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "location": {"lat": 35.6895, "lon": 139.6917},
                "forecast": [20.0],
                "recommended": ["test_crop"]
            })
        );
    }
}
