use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const DEFAULT_PRIMARY_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_FALLBACK_BASE_URL: &str = "https://wttr.in";
pub const DEFAULT_CITY: &str = "Kuala Lumpur";

/// Environment variable that overrides the stored primary API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Settings for the primary (credentialed) provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_primary_base_url")]
    pub base_url: String,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_primary_base_url(),
        }
    }
}

/// Settings for the free fallback provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_fallback_base_url")]
    pub base_url: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            base_url: default_fallback_base_url(),
        }
    }
}

fn default_primary_base_url() -> String {
    DEFAULT_PRIMARY_BASE_URL.to_string()
}

fn default_fallback_base_url() -> String {
    DEFAULT_FALLBACK_BASE_URL.to_string()
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Kuala Lumpur"
///
/// [primary]
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
///
/// [fallback]
/// base_url = "https://wttr.in"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// City looked up when none is given.
    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default)]
    pub primary: PrimaryConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            primary: PrimaryConfig::default(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl Config {
    /// Config pointing both providers at explicit base URLs; used to target test servers.
    pub fn with_endpoints(api_key: impl Into<String>, primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            default_city: default_city(),
            primary: PrimaryConfig {
                api_key: api_key.into(),
                base_url: primary.into(),
            },
            fallback: FallbackConfig {
                base_url: fallback.into(),
            },
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from disk, then apply environment overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut cfg = Self::load()?;
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            cfg.apply_api_key_override(key);
        }
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.primary.api_key = api_key;
    }

    fn apply_api_key_override(&mut self, key: String) {
        let key = key.trim();
        if !key.is_empty() {
            self.primary.api_key = key.to_string();
        }
    }

    /// The requested city if it is non-blank, otherwise the configured default.
    pub fn city_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim).filter(|c| !c.is_empty()) {
            Some(city) => city,
            None => {
                let configured = self.default_city.trim();
                if configured.is_empty() { DEFAULT_CITY } else { configured }
            }
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.primary.api_key.trim().is_empty()
    }

    pub fn primary_base_url(&self) -> &str {
        self.primary.base_url.trim_end_matches('/')
    }

    pub fn fallback_base_url(&self) -> &str {
        self.fallback.base_url.trim_end_matches('/')
    }
}
