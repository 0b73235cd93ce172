//! Entry point for a lookup: primary provider first, fallback when the credential is rejected.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;

use crate::{
    Config, WeatherError, WeatherReport,
    error::EMPTY_CITY_MESSAGE,
    provider::{
        ProviderId, WeatherProvider, http_client,
        openweather::{CurrentLookup, OpenWeatherProvider},
        wttr::WttrProvider,
    },
};

#[derive(Debug, Clone)]
pub struct WeatherService {
    primary: OpenWeatherProvider,
    fallback: WttrProvider,
}

impl WeatherService {
    /// Build both providers from `config` with a fresh HTTP client.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = http_client().context("Failed to build HTTP client")?;
        Ok(Self::with_client(config, http))
    }

    pub fn with_client(config: &Config, http: Client) -> Self {
        if !config.has_api_key() {
            tracing::debug!("no primary API key configured; lookups will fall back");
        }

        Self {
            primary: OpenWeatherProvider::new(
                config.primary.api_key.clone(),
                config.primary_base_url().to_string(),
                http.clone(),
            ),
            fallback: WttrProvider::new(config.fallback_base_url().to_string(), http),
        }
    }

    /// Look up current weather and the daily forecast for `city`.
    ///
    /// The forecast is only requested after the current conditions succeed, and a failed
    /// forecast fails the whole lookup. A 401 from the primary hands the entire lookup
    /// to the fallback provider.
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::fetch_failed(EMPTY_CITY_MESSAGE));
        }

        match self.primary.fetch_current(city).await? {
            CurrentLookup::Found(current) => {
                let forecast = self.primary.fetch_forecast(city, Utc::now()).await?;
                tracing::debug!(city, days = forecast.len(), "lookup served by primary provider");

                Ok(WeatherReport {
                    source: ProviderId::OpenWeather,
                    current,
                    forecast,
                })
            }
            CurrentLookup::Unauthorized => {
                tracing::warn!(city, "primary credential rejected; using fallback provider");
                self.fallback.fetch_via_fallback(city).await
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherService {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        WeatherService::fetch_weather(self, city).await
    }
}
