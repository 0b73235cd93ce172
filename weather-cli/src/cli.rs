use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use weather_core::{Config, LookupState, RequestTracker, WeatherService, config::API_KEY_ENV};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and a 5-day forecast for a city.
    Show {
        /// City name, e.g. "Paris". Defaults to the configured `default_city`.
        city: Option<String>,

        /// Print the result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Look up cities one after another until an empty line is entered.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city.as_deref(), json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Leave empty to always use the free fallback provider")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::load_with_env()?;
    if !config.has_api_key() {
        tracing::info!("no API key configured (run `weather configure` or set {API_KEY_ENV})");
    }
    Ok(config)
}

async fn show(city: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = WeatherService::new(&config)?;
    let city = config.city_or_default(city);
    let state = LookupState::from(service.fetch_weather(city).await);

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    match state {
        LookupState::Error { message, .. } => bail!(message),
        state if !json => println!("{}", render::state(&state)),
        _ => {}
    }
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let service = WeatherService::new(&load_config()?)?;
    let tracker = RequestTracker::new();

    loop {
        let city = inquire::Text::new("City:")
            .with_help_message("Empty line to quit")
            .prompt()
            .context("Failed to read city name")?;

        let city = city.trim();
        if city.is_empty() {
            return Ok(());
        }

        let token = tracker.begin();
        println!("{}", render::state(&LookupState::Loading));

        let result = service.fetch_weather(city).await;
        if let Some(state) = tracker.settle(token, result) {
            println!("{}\n", render::state(&state));
        }
    }
}
