use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::db::Database;
use crate::error::{CropSenseError, Result};
use crate::logic::{build_report, RulesEngine};
use crate::models::{Crop, Report, WeatherSnapshot};
use chrono::NaiveDate;

/// Everything one refresh produced, including the raw inputs for display
#[derive(Debug, Clone, Default)]
pub struct RefreshOutcome {
    pub crops: Vec<Crop>,
    pub weather: Option<WeatherSnapshot>,
    pub report: Report,
    pub crops_failed: bool,
    /// A weather client exists, so a missing snapshot means the fetch failed
    pub weather_configured: bool,
}

impl RefreshOutcome {
    pub fn weather_failed(&self) -> bool {
        self.weather_configured && self.weather.is_none()
    }

    /// Fail when the crop store could not be read.
    ///
    /// The fallback report would otherwise claim an empty farm is all clear.
    pub fn require_crops(&self) -> Result<()> {
        if self.crops_failed {
            return Err(CropSenseError::DataSourceUnavailable(
                "crop store could not be read, report would be incomplete".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionStatus {
    pub database: bool,
    pub openweathermap: Option<bool>,
}

/// Fetches crops and weather, then rebuilds the report from scratch
pub struct RefreshService {
    owner: String,
    db: Database,
    openweathermap_client: Option<OpenWeatherMapClient>,
    engine: RulesEngine,
}

impl RefreshService {
    pub fn new(config: &Config, db: Database) -> Self {
        let openweathermap_client = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured for current conditions");
                OpenWeatherMapClient::new(c.clone())
            });

        if openweathermap_client.is_none() {
            tracing::info!("OpenWeatherMap not configured - weather alerts disabled");
        }

        Self {
            owner: config.farm.owner.clone(),
            db,
            openweathermap_client,
            engine: RulesEngine::new(),
        }
    }

    pub fn engine(&self) -> &RulesEngine {
        &self.engine
    }

    /// Run one full refresh.
    ///
    /// Crops and weather are fetched concurrently. A failed source is logged
    /// and treated as absent, so this never fails.
    pub async fn refresh(&self, today: NaiveDate) -> RefreshOutcome {
        let (crops, weather) = tokio::join!(self.fetch_crops(), self.fetch_weather());

        let (crops, crops_failed) = match crops {
            Ok(crops) => (crops, false),
            Err(e) => {
                tracing::warn!("Failed to load crops: {}", e);
                (Vec::new(), true)
            }
        };

        let report = build_report(&self.engine, &crops, weather.as_ref(), today);
        tracing::debug!(
            crops = crops.len(),
            insights = report.insights.len(),
            alert = report.alert.is_some(),
            "Report rebuilt"
        );

        RefreshOutcome {
            crops,
            weather,
            report,
            crops_failed,
            weather_configured: self.openweathermap_client.is_some(),
        }
    }

    async fn fetch_crops(&self) -> Result<Vec<Crop>> {
        let db = self.db.clone();
        let owner = self.owner.clone();
        tokio::task::spawn_blocking(move || db.get_crops_for_owner(&owner))
            .await
            .map_err(|e| {
                CropSenseError::DataSourceUnavailable(format!(
                    "crop query task failed: {}",
                    e
                ))
            })?
    }

    async fn fetch_weather(&self) -> Option<WeatherSnapshot> {
        let client = self.openweathermap_client.as_ref()?;
        match client.fetch_current().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Failed to fetch weather: {}", e);
                None
            }
        }
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let database = self.db.get_crops_for_owner(&self.owner).is_ok();

        let openweathermap = match &self.openweathermap_client {
            Some(client) => Some(client.test_connection().await.unwrap_or(false)),
            None => None,
        };

        ConnectionStatus {
            database,
            openweathermap,
        }
    }
}
