use serde::{Deserialize, Serialize};

/// Current conditions as reported by the weather provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Short condition group, e.g. "Rain", "Clear", "Clouds"
    pub condition_main: String,
    pub temperature_c: f64,
}

impl WeatherSnapshot {
    pub fn new(condition_main: impl Into<String>, temperature_c: f64) -> Self {
        Self {
            condition_main: condition_main.into(),
            temperature_c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherAlertKind {
    RainAlert,
    HighHeat,
}

impl WeatherAlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherAlertKind::RainAlert => "Rain Alert",
            WeatherAlertKind::HighHeat => "High Heat",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            WeatherAlertKind::RainAlert => Color::LightBlue,
            WeatherAlertKind::HighHeat => Color::Red,
        }
    }
}

impl std::fmt::Display for WeatherAlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub kind: WeatherAlertKind,
    pub message: String,
}

impl WeatherAlert {
    pub fn new(kind: WeatherAlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
