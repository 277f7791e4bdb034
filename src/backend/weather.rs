//! OpenWeatherMap client for the customer screen header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::backend::WeatherProvider;
use crate::backend::errors::{BackendError, BackendResult};
use crate::domain::weather::{Location, Weather};

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Conditions>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Conditions {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    async fn fetch(&self, api_key: &str, location: Location) -> BackendResult<Weather> {
        let (lat, lon) = location.coordinates();
        let url = format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", "imperial".to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::from_response(status.as_u16(), &body));
        }

        let current: CurrentWeather = response.json().await?;
        Ok(Weather {
            location,
            temperature: current.main.temp.round() as i64,
            description: current
                .weather
                .into_iter()
                .map(|c| c.description)
                .find(|d| !d.is_empty()),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, location: Location) -> Option<Weather> {
        let api_key = self.api_key.as_deref()?;
        match self.fetch(api_key, location).await {
            Ok(weather) => Some(weather),
            Err(e) => {
                log::warn!("Failed to fetch weather for {}: {e}", location.label());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn missing_api_key_yields_no_weather() {
        let client = OpenWeatherClient::new("http://127.0.0.1:9", Some("  ".to_string()), 1)
            .unwrap();

        assert!(client.current(Location::Houston).await.is_none());
    }
}
