//! Errors surfaced to callers of the weather lookup.

use thiserror::Error;

pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch weather data. Please try again.";
pub const FORECAST_FETCH_MESSAGE: &str = "Failed to fetch forecast data.";
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";

/// Every failed lookup ends in exactly one of these.
///
/// Messages are meant for display and never carry the provider payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("City not found. Please check the spelling and try again.")]
    CityNotFound,

    #[error("{0}")]
    FetchFailed(String),
}

impl WeatherError {
    pub fn fetch_failed<S: Into<String>>(message: S) -> Self {
        Self::FetchFailed(message.into())
    }

    /// The generic failure used for transport errors and unexpected responses.
    pub fn generic() -> Self {
        Self::fetch_failed(GENERIC_FETCH_MESSAGE)
    }

    pub fn forecast() -> Self {
        Self::fetch_failed(FORECAST_FETCH_MESSAGE)
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert!(WeatherError::CityNotFound.user_message().contains("City not found"));
        assert_eq!(WeatherError::generic().to_string(), GENERIC_FETCH_MESSAGE);
        assert_eq!(
            WeatherError::forecast(),
            WeatherError::FetchFailed("Failed to fetch forecast data.".into())
        );
    }
}
