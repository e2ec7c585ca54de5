use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::logic::RefreshOutcome;
use crate::models::{Crop, Report, WeatherSnapshot};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Crops,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Crops),
            _ => None,
        }
    }
}

pub struct ListSelection {
    pub selected_index: usize,
}

impl ListSelection {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Latest refresh
    pub crops: Vec<Crop>,
    pub weather: Option<WeatherSnapshot>,
    pub report: Report,
    pub last_refreshed: Option<DateTime<Local>>,

    pub crops_state: ListSelection,
    pub insights_state: ListSelection,

    // UI state
    pub status_message: Option<String>,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            config,
            db,
            crops: Vec::new(),
            weather: None,
            report: Report::default(),
            last_refreshed: None,
            crops_state: ListSelection::new(),
            insights_state: ListSelection::new(),
            status_message: None,
            needs_refresh: false,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing...");
    }

    /// Replace everything from the previous refresh, including the alert
    pub fn apply_refresh(&mut self, outcome: RefreshOutcome) {
        let mut notes = Vec::new();
        if outcome.crops_failed {
            notes.push("Crops unavailable");
        }
        if outcome.weather_failed() {
            notes.push("Weather unavailable");
        }

        self.crops = outcome.crops;
        self.weather = outcome.weather;
        self.report = outcome.report;
        self.last_refreshed = Some(Local::now());
        self.crops_state.clamp(self.crops.len());
        self.insights_state.clamp(self.report.insights.len());

        if notes.is_empty() {
            self.set_status("Refreshed");
        } else {
            self.set_status(&notes.join(" | "));
        }
    }

    pub fn selected_crop(&self) -> Option<&Crop> {
        self.crops.get(self.crops_state.selected_index)
    }

    pub fn toggle_selected_harvested(&mut self) -> Result<()> {
        let (id, status) = match self.selected_crop().and_then(|c| c.id.map(|id| (id, c.status))) {
            Some(v) => v,
            None => return Ok(()),
        };
        self.db.update_crop_status(id, status.toggled())?;
        self.request_refresh();
        Ok(())
    }

    pub fn remove_selected(&mut self) -> Result<()> {
        let id = match self.selected_crop().and_then(|c| c.id) {
            Some(id) => id,
            None => return Ok(()),
        };
        self.db.delete_crop(id)?;
        self.request_refresh();
        Ok(())
    }

    pub fn last_refreshed_label(&self) -> Option<String> {
        self.last_refreshed
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenWeatherMapConfig;
    use crate::models::{CropStatus, Insight, InsightCategory, WeatherAlert, WeatherAlertKind};
    use chrono::NaiveDate;

    fn app_with_crop() -> (App, i64) {
        let db = Database::open_in_memory().unwrap();
        let config = Config::default();
        let crop = Crop::new(
            "Wheat",
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            CropStatus::Growing,
        )
        .with_owner(&config.farm.owner);
        let id = db.create_crop(&crop).unwrap();
        let mut app = App::new(config, db.clone());
        app.crops = db.get_crops_for_owner("farmer").unwrap();
        (app, id)
    }

    #[test]
    fn refresh_clears_previous_alert() {
        let (mut app, _) = app_with_crop();
        app.report.alert = Some(WeatherAlert::new(WeatherAlertKind::HighHeat, "hot"));

        app.apply_refresh(RefreshOutcome {
            report: Report {
                insights: vec![Insight::new(InsightCategory::Info, "All Clear", "")],
                ..Report::default()
            },
            ..RefreshOutcome::default()
        });

        assert!(app.report.alert.is_none());
        assert!(app.last_refreshed.is_some());
    }

    #[test]
    fn toggling_harvested_updates_store_and_requests_refresh() {
        let (mut app, id) = app_with_crop();
        app.toggle_selected_harvested().unwrap();

        assert!(app.needs_refresh);
        assert_eq!(app.db.get_crop(id).unwrap().status, CropStatus::Harvested);
    }

    #[test]
    fn selection_is_clamped_after_shrink() {
        let mut state = ListSelection::new();
        state.next(3);
        state.next(3);
        assert_eq!(state.selected_index, 2);
        state.clamp(1);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn disabled_weather_does_not_warn() {
        let db = Database::open_in_memory().unwrap();
        let config = Config {
            openweathermap: Some(OpenWeatherMapConfig {
                api_key: "key".to_string(),
                latitude: 31.5,
                longitude: 74.3,
                enabled: false,
            }),
            ..Config::default()
        };
        let mut app = App::new(config, db);

        app.apply_refresh(RefreshOutcome::default());

        assert_eq!(app.status_message.as_deref(), Some("Refreshed"));
    }

    #[test]
    fn failed_sources_are_noted_in_status() {
        let (mut app, _) = app_with_crop();

        app.apply_refresh(RefreshOutcome {
            crops_failed: true,
            weather_configured: true,
            ..RefreshOutcome::default()
        });

        assert_eq!(
            app.status_message.as_deref(),
            Some("Crops unavailable | Weather unavailable")
        );
    }

    #[test]
    fn insight_selection_is_clamped_to_new_report() {
        let (mut app, _) = app_with_crop();
        app.insights_state.selected_index = 5;

        app.apply_refresh(RefreshOutcome {
            report: Report {
                insights: vec![
                    Insight::new(InsightCategory::Warning, "Maize: Weed Control Window", ""),
                    Insight::new(InsightCategory::Harvest, "Rice: Harvest Readiness", ""),
                ],
                ..Report::default()
            },
            ..RefreshOutcome::default()
        });

        assert_eq!(app.insights_state.selected_index, 1);
    }
}
