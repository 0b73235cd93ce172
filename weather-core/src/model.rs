use serde::{Deserialize, Serialize};

use crate::provider::ProviderId;

/// Maximum number of days kept in a [`ForecastSeries`].
pub const MAX_FORECAST_DAYS: usize = 5;

/// Label used for the entry that falls on the query day.
pub const TODAY_LABEL: &str = "Today";

/// Closed set of weather categories used to pick a glyph downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
    Unknown,
}

impl IconCategory {
    /// Map a primary provider icon code such as `"10d"` or `"01n"`.
    ///
    /// Only the two-digit condition prefix matters; the day/night suffix is ignored.
    pub fn from_icon_code(code: &str) -> Self {
        match code.get(..2) {
            Some("01") => Self::Clear,
            Some("02") => Self::PartlyCloudy,
            Some("03") | Some("04") => Self::Cloudy,
            Some("09") | Some("10") => Self::Rain,
            Some("11") => Self::Thunderstorm,
            Some("13") => Self::Snow,
            Some("50") => Self::Fog,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub visibility_m: f64,
    pub description: String,
    pub icon_category: IconCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `"Today"` or a short English weekday name (`"Mon"`, `"Tue"`, ...).
    pub label: String,
    pub temperature_c: f64,
    pub icon_category: IconCategory,
    pub description: String,
}

/// Up to [`MAX_FORECAST_DAYS`] days in chronological order, each label at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastSeries(Vec<ForecastDay>);

impl ForecastSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a day unless the series is full or already has a day with that label.
    ///
    /// Returns whether the day was kept.
    pub fn try_push(&mut self, day: ForecastDay) -> bool {
        if self.is_full() || self.contains_label(&day.label) {
            return false;
        }
        self.0.push(day);
        true
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.0.iter().any(|d| d.label == label)
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_FORECAST_DAYS
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastDay> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastDay;
    type IntoIter = std::slice::Iter<'a, ForecastDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of one successful lookup: current conditions plus the daily forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Provider that actually answered the lookup.
    pub source: ProviderId,
    pub current: CurrentWeather,
    pub forecast: ForecastSeries,
}
