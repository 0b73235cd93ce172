use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    WeatherError,
    aggregate::{ForecastSample, aggregate},
    model::{CurrentWeather, ForecastSeries, IconCategory},
    provider::{ProviderId, decode, truncate_body},
};

/// Outcome of the current-weather call that the orchestrator branches on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CurrentLookup {
    Found(CurrentWeather),
    /// The credential was rejected (not yet active); the caller should use the fallback.
    Unauthorized,
}

/// Primary provider: OpenWeatherMap current weather and 5 day / 3 hour forecast.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, http: Client) -> Self {
        Self {
            api_key,
            base_url,
            http,
        }
    }

    /// GET `{base_url}/{endpoint}` for a city in metric units.
    async fn get(&self, endpoint: &str, city: &str) -> reqwest::Result<(StatusCode, String)> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, city, "requesting OpenWeather {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        Ok((status, body))
    }

    pub(crate) async fn fetch_current(&self, city: &str) -> Result<CurrentLookup, WeatherError> {
        let (status, body) = self.get("weather", city).await.map_err(|err| {
            tracing::warn!(error = %err, "OpenWeather current request failed");
            WeatherError::generic()
        })?;

        match status {
            StatusCode::OK => {
                let parsed: OwCurrentResponse = decode(ProviderId::OpenWeather, &body)?;
                Ok(CurrentLookup::Found(parsed.into_current()))
            }
            StatusCode::UNAUTHORIZED => Ok(CurrentLookup::Unauthorized),
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound),
            other => {
                tracing::warn!(status = %other, body = %truncate_body(&body), "OpenWeather current request rejected");
                Err(WeatherError::generic())
            }
        }
    }

    /// Fetch the 3-hourly forecast and collapse it to days, with `now` deciding which day is "Today".
    pub(crate) async fn fetch_forecast(
        &self,
        city: &str,
        now: DateTime<Utc>,
    ) -> Result<ForecastSeries, WeatherError> {
        let (status, body) = self.get("forecast", city).await.map_err(|err| {
            tracing::warn!(error = %err, "OpenWeather forecast request failed");
            WeatherError::generic()
        })?;

        if status != StatusCode::OK {
            tracing::warn!(status = %status, body = %truncate_body(&body), "OpenWeather forecast request rejected");
            return Err(WeatherError::forecast());
        }

        let parsed: OwForecastResponse =
            decode(ProviderId::OpenWeather, &body).map_err(|_| WeatherError::forecast())?;
        let offset = parsed.utc_offset();
        let today = now.with_timezone(&offset).date_naive();

        let samples: Vec<ForecastSample> = parsed.list.into_iter().map(OwForecastEntry::into_sample).collect();
        tracing::debug!(samples = samples.len(), %offset, "aggregating OpenWeather forecast");

        Ok(aggregate(&samples, today, offset))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: f64,
}

/// Description and category of the first `weather` element, if any.
fn condition(weather: &[OwWeather]) -> (String, IconCategory) {
    weather
        .first()
        .map(|w| (w.description.clone(), IconCategory::from_icon_code(&w.icon)))
        .unwrap_or_else(|| ("Unknown".to_string(), IconCategory::Unknown))
}

impl OwCurrentResponse {
    fn into_current(self) -> CurrentWeather {
        let (description, icon_category) = condition(&self.weather);

        CurrentWeather {
            location: self.name,
            temperature_c: self.main.temp,
            humidity_pct: self.main.humidity.min(100),
            pressure_hpa: self.main.pressure,
            wind_speed_mps: self.wind.speed,
            visibility_m: self.visibility,
            description,
            icon_category,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

impl OwForecastEntry {
    fn into_sample(self) -> ForecastSample {
        let (description, icon_category) = condition(&self.weather);

        ForecastSample {
            timestamp: self.dt,
            temperature_c: self.main.temp,
            icon_category,
            description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    /// Shift in seconds from UTC.
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl OwForecastResponse {
    fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.city.timezone).unwrap_or_else(|| Utc.fix())
    }
}
