use super::rules::RulesEngine;
use super::weather_alert::classify;
use crate::models::{Crop, CropDistribution, Report, WeatherSnapshot};
use chrono::NaiveDate;

/// Assemble the report shown to the farmer.
///
/// Pure: the same crops, weather and date always produce the same report.
/// A missing weather snapshot just means no alert.
pub fn build_report(
    engine: &RulesEngine,
    crops: &[Crop],
    weather: Option<&WeatherSnapshot>,
    today: NaiveDate,
) -> Report {
    Report {
        distribution: CropDistribution::from_crops(crops),
        alert: weather.and_then(classify),
        insights: engine.evaluate(crops, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropStatus, InsightCategory, WeatherAlertKind};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
    }

    #[test]
    fn wheat_at_day_22_on_a_clear_day() {
        let crops = vec![Crop::new(
            "Wheat A",
            today() - Duration::days(22),
            CropStatus::Growing,
        )];
        let weather = WeatherSnapshot::new("Clear", 30.0);

        let report = build_report(&RulesEngine::new(), &crops, Some(&weather), today());

        assert!(report.alert.is_none());
        assert_eq!(report.insights.len(), 2);
        assert_eq!(report.insights[0].category, InsightCategory::Water);
        assert_eq!(report.insights[1].category, InsightCategory::Warning);
        assert_eq!(
            report.distribution,
            CropDistribution {
                growing: 1,
                harvested: 0
            }
        );
    }

    #[test]
    fn same_inputs_give_same_report() {
        let engine = RulesEngine::new();
        let crops = vec![
            Crop::new("Wheat", today() - Duration::days(55), CropStatus::Growing),
            Crop::new("Rice", today() - Duration::days(140), CropStatus::Harvested),
        ];
        let weather = WeatherSnapshot::new("Clear", 36.2);

        let first = build_report(&engine, &crops, Some(&weather), today());
        let second = build_report(&engine, &crops, Some(&weather), today());
        assert_eq!(first, second);
    }

    #[test]
    fn missing_weather_means_no_alert() {
        let report = build_report(&RulesEngine::new(), &[], None, today());
        assert!(report.alert.is_none());
        assert!(report.distribution.is_empty());
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].category, InsightCategory::Info);
    }

    #[test]
    fn harvested_crop_counts_but_gets_no_insight() {
        let crops = vec![Crop::new(
            "Wheat",
            today() - Duration::days(130),
            CropStatus::Harvested,
        )];
        let weather = WeatherSnapshot::new("Rain", 18.0);

        let report = build_report(&RulesEngine::new(), &crops, Some(&weather), today());

        assert_eq!(report.distribution.harvested, 1);
        assert_eq!(report.distribution.growing, 0);
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].category, InsightCategory::Info);
        assert_eq!(
            report.alert.map(|a| a.kind),
            Some(WeatherAlertKind::RainAlert)
        );
    }
}
