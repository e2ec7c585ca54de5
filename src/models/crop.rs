use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropStatus {
    Growing,
    Harvested,
}

impl CropStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropStatus::Growing => "Growing",
            CropStatus::Harvested => "Harvested",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            CropStatus::Growing => Color::Green,
            CropStatus::Harvested => Color::Yellow,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            CropStatus::Growing => CropStatus::Harvested,
            CropStatus::Harvested => CropStatus::Growing,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "growing" | "active" => Some(CropStatus::Growing),
            "harvested" => Some(CropStatus::Harvested),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropHealth {
    #[default]
    Good,
    Moderate,
    Poor,
}

impl CropHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropHealth::Good => "Good",
            CropHealth::Moderate => "Moderate",
            CropHealth::Poor => "Poor",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            CropHealth::Good => Color::Green,
            CropHealth::Moderate => Color::Yellow,
            CropHealth::Poor => Color::Red,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "good" => Some(CropHealth::Good),
            "moderate" | "fair" => Some(CropHealth::Moderate),
            "poor" => Some(CropHealth::Poor),
            _ => None,
        }
    }
}

impl std::fmt::Display for CropHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A crop record as supplied by the crop store.
///
/// `id` and `owner` are storage metadata; insight rules only look at
/// `name`, `planted_date` and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub id: Option<i64>,
    pub owner: String,
    pub name: String,
    pub planted_date: NaiveDate,
    pub status: CropStatus,
    pub health: CropHealth,
}

impl Crop {
    pub fn new(name: impl Into<String>, planted_date: NaiveDate, status: CropStatus) -> Self {
        Self {
            id: None,
            owner: String::new(),
            name: name.into(),
            planted_date,
            status,
            health: CropHealth::default(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_health(mut self, health: CropHealth) -> Self {
        self.health = health;
        self
    }

    /// Whole calendar days since planting. Negative if planted in the future.
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.planted_date).num_days()
    }

    pub fn is_growing(&self) -> bool {
        self.status == CropStatus::Growing
    }

    /// Case-insensitive substring match against any of `keywords`
    pub fn name_matches_any(&self, keywords: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        keywords.iter().any(|k| name.contains(&k.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_is_calendar_day_difference() {
        let crop = Crop::new("Wheat", date(2024, 11, 1), CropStatus::Growing);
        assert_eq!(crop.age_days(date(2024, 11, 1)), 0);
        assert_eq!(crop.age_days(date(2024, 11, 23)), 22);
        // Crosses a month and year boundary
        assert_eq!(crop.age_days(date(2025, 1, 1)), 61);
    }

    #[test]
    fn future_planting_has_negative_age() {
        let crop = Crop::new("Rice", date(2024, 6, 10), CropStatus::Growing);
        assert_eq!(crop.age_days(date(2024, 6, 5)), -5);
    }

    #[test]
    fn name_matching_is_substring_and_case_insensitive() {
        let crop = Crop::new("Wheat2024", date(2024, 1, 1), CropStatus::Growing);
        assert!(crop.name_matches_any(&["wheat", "gandum"]));

        let crop = Crop::new("Desi GANDUM field", date(2024, 1, 1), CropStatus::Growing);
        assert!(crop.name_matches_any(&["wheat", "gandum"]));

        let crop = Crop::new("Maize", date(2024, 1, 1), CropStatus::Growing);
        assert!(!crop.name_matches_any(&["wheat", "gandum"]));
    }

    #[test]
    fn status_parsing() {
        assert_eq!(CropStatus::from_str("Growing"), Some(CropStatus::Growing));
        assert_eq!(CropStatus::from_str("HARVESTED"), Some(CropStatus::Harvested));
        assert_eq!(CropStatus::from_str("sold"), None);
        assert_eq!(CropStatus::Growing.toggled(), CropStatus::Harvested);
    }

    #[test]
    fn health_parsing() {
        assert_eq!(CropHealth::from_str("good"), Some(CropHealth::Good));
        assert_eq!(CropHealth::from_str("Moderate"), Some(CropHealth::Moderate));
        assert_eq!(CropHealth::from_str("poor"), Some(CropHealth::Poor));
        assert_eq!(CropHealth::from_str("excellent"), None);
    }
}
