use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    WeatherError, WeatherReport,
    classify::classify,
    model::{CurrentWeather, ForecastDay, ForecastSeries, MAX_FORECAST_DAYS, TODAY_LABEL},
    provider::{ProviderId, WeatherProvider, decode, truncate_body},
    units::{km_to_meters, kmh_to_mps},
};

/// Hourly slots averaged into a day's temperature (roughly morning and midday).
const MORNING_SLOT: usize = 0;
const MIDDAY_SLOT: usize = 3;

/// Fallback provider: wttr.in JSON (`?format=j1`), no credential needed.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }

    /// Fetch current conditions and forecast in a single call.
    ///
    /// Any failure, including a body missing expected fields, is the generic fetch error.
    pub async fn fetch_via_fallback(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(city));
        tracing::debug!(%url, "requesting wttr.in");

        let res = self
            .http
            .get(&url)
            .query(&[("format", "j1")])
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "wttr.in request failed");
                WeatherError::generic()
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            tracing::warn!(error = %err, "failed to read wttr.in response body");
            WeatherError::generic()
        })?;

        if status != StatusCode::OK {
            tracing::warn!(status = %status, body = %truncate_body(&body), "wttr.in request rejected");
            return Err(WeatherError::generic());
        }

        let parsed: WttrResponse = decode(ProviderId::Wttr, &body)?;
        parsed.into_report()
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        self.fetch_via_fallback(city).await
    }
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrCurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    humidity: String,
    pressure: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
    /// Kilometres.
    visibility: String,
}

#[derive(Debug, Deserialize)]
struct WttrNearestArea {
    #[serde(rename = "areaName")]
    area_name: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrHourly {
    #[serde(rename = "tempC")]
    temp_c: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    date: String,
    hourly: Vec<WttrHourly>,
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    current_condition: Vec<WttrCurrentCondition>,
    nearest_area: Vec<WttrNearestArea>,
    weather: Vec<WttrDay>,
}

/// Log which piece of the body was missing and return the generic error.
fn missing(what: &str) -> WeatherError {
    tracing::warn!(field = what, "wttr.in response is missing expected data");
    WeatherError::generic()
}

fn first_value<'a>(values: &'a [WttrValue], what: &str) -> Result<&'a str, WeatherError> {
    values.first().map(|v| v.value.as_str()).ok_or_else(|| missing(what))
}

/// wttr.in reports every reading as a string.
fn number(raw: &str, what: &str) -> Result<f64, WeatherError> {
    raw.trim().parse::<f64>().map_err(|_| missing(what))
}

fn humidity(raw: &str) -> Result<u8, WeatherError> {
    raw.trim()
        .parse::<u8>()
        .map(|h| h.min(100))
        .map_err(|_| missing("humidity"))
}

impl WttrResponse {
    fn into_report(self) -> Result<WeatherReport, WeatherError> {
        let current = self.current()?;
        let forecast = forecast(&self.weather)?;

        Ok(WeatherReport {
            source: ProviderId::Wttr,
            current,
            forecast,
        })
    }

    fn current(&self) -> Result<CurrentWeather, WeatherError> {
        let condition = self.current_condition.first().ok_or_else(|| missing("current_condition"))?;
        let area = self.nearest_area.first().ok_or_else(|| missing("nearest_area"))?;
        let description = first_value(&condition.weather_desc, "weatherDesc")?.to_string();

        Ok(CurrentWeather {
            location: first_value(&area.area_name, "areaName")?.to_string(),
            temperature_c: number(&condition.temp_c, "temp_C")?,
            humidity_pct: humidity(&condition.humidity)?,
            pressure_hpa: number(&condition.pressure, "pressure")?,
            wind_speed_mps: kmh_to_mps(number(&condition.windspeed_kmph, "windspeedKmph")?),
            visibility_m: km_to_meters(number(&condition.visibility, "visibility")?),
            icon_category: classify(&description),
            description,
        })
    }
}

fn forecast(days: &[WttrDay]) -> Result<ForecastSeries, WeatherError> {
    let mut series = ForecastSeries::new();

    for (index, day) in days.iter().take(MAX_FORECAST_DAYS).enumerate() {
        let label = if index == 0 {
            TODAY_LABEL.to_string()
        } else {
            weekday_label(&day.date)?
        };

        let morning = day.hourly.get(MORNING_SLOT).ok_or_else(|| missing("hourly"))?;
        let midday = day.hourly.get(MIDDAY_SLOT).ok_or_else(|| missing("hourly"))?;
        let mean = (number(&morning.temp_c, "tempC")? + number(&midday.temp_c, "tempC")?) / 2.0;
        let description = first_value(&morning.weather_desc, "weatherDesc")?.to_string();

        series.try_push(ForecastDay {
            label,
            temperature_c: round_half_up(mean),
            icon_category: classify(&description),
            description,
        });
    }

    Ok(series)
}

/// Nearest whole number, halves toward positive infinity (-0.5 becomes 0).
fn round_half_up(x: f64) -> f64 {
    let rounded = (x + 0.5).floor();
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn weekday_label(date: &str) -> Result<String, WeatherError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .map_err(|_| missing("date"))
}
