use crate::config::OpenWeatherMapConfig;
use crate::error::{CropSenseError, Result};
use crate::models::WeatherSnapshot;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current weather response, only the fields we read
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    weather: Vec<OwmWeather>,
    main: OwmMain,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn current_url(&self) -> String {
        format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, self.config.latitude, self.config.longitude, self.config.api_key
        )
    }

    /// Fetch current conditions for the configured location
    pub async fn fetch_current(&self) -> Result<WeatherSnapshot> {
        let response = self
            .client
            .get(self.current_url())
            .send()
            .await
            .map_err(|e| CropSenseError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropSenseError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            CropSenseError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        convert_response(owm_response)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self.client.get(self.current_url()).send().await?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OwmCurrentResponse) -> Result<WeatherSnapshot> {
    let condition = response.weather.into_iter().next().ok_or_else(|| {
        CropSenseError::InvalidData("OpenWeatherMap response has no weather conditions".into())
    })?;

    if !response.main.temp.is_finite() {
        return Err(CropSenseError::InvalidData(format!(
            "OpenWeatherMap temperature is not a number: {}",
            response.main.temp
        )));
    }

    tracing::debug!(
        location = %response.name,
        condition = %condition.main,
        temp_c = response.main.temp,
        "Fetched current weather"
    );

    Ok(WeatherSnapshot::new(condition.main, response.main.temp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            latitude: 31.5204,
            longitude: 74.3587,
            enabled: true,
        }
    }

    #[test]
    fn url_requests_metric_units() {
        let client = OpenWeatherMapClient::new(sample_config());
        let url = client.current_url();
        assert!(url.contains("units=metric"));
        assert!(url.contains("lat=31.5204"));
        assert!(url.contains("appid=test_key"));
    }

    #[test]
    fn converts_current_weather_json() {
        let json = r#"{
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain"}],
            "main": {"temp": 24.3, "feels_like": 25.0, "humidity": 88},
            "name": "Lahore"
        }"#;
        let response: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        let snapshot = convert_response(response).unwrap();
        assert_eq!(snapshot.condition_main, "Rain");
        assert!((snapshot.temperature_c - 24.3).abs() < 1e-9);
    }

    #[test]
    fn missing_conditions_are_rejected() {
        let json = r#"{"weather": [], "main": {"temp": 30.0}}"#;
        let response: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            convert_response(response),
            Err(CropSenseError::InvalidData(_))
        ));
    }
}
