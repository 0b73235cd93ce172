//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Normalized weather models shared by every provider
//! - The primary (OpenWeatherMap) and fallback (wttr.in) provider adapters
//! - Description classification, unit conversion and daily aggregation
//! - [`WeatherService`], which picks a provider and returns one result per lookup
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod state;
pub mod units;

pub use classify::classify;
pub use config::{Config, FallbackConfig, PrimaryConfig};
pub use error::WeatherError;
pub use model::{CurrentWeather, ForecastDay, ForecastSeries, IconCategory, WeatherReport};
pub use provider::{ProviderId, WeatherProvider};
pub use service::WeatherService;
pub use state::{ErrorKind, LookupState, RequestToken, RequestTracker};
