use crate::models::{WeatherAlert, WeatherAlertKind, WeatherSnapshot};

/// Above this temperature (°C) crops are at risk of heat stress
pub const HIGH_HEAT_THRESHOLD_C: f64 = 35.0;

/// Map current conditions to at most one alert.
///
/// Rain takes precedence over heat. `None` means there is nothing to show,
/// so any previously displayed alert should be cleared.
pub fn classify(snapshot: &WeatherSnapshot) -> Option<WeatherAlert> {
    if snapshot.condition_main.to_lowercase().contains("rain") {
        return Some(WeatherAlert::new(
            WeatherAlertKind::RainAlert,
            "Rain expected. Skip irrigation today to avoid waterlogging and root rot.",
        ));
    }

    if snapshot.temperature_c > HIGH_HEAT_THRESHOLD_C {
        return Some(WeatherAlert::new(
            WeatherAlertKind::HighHeat,
            format!(
                "High temperature ({}°C). Increase watering to protect crops from heat stress.",
                snapshot.temperature_c.round() as i64
            ),
        ));
    }

    None
}
