//! Central configuration for the lislip crate
//!
//! Everything is read from environment variables. Required values that are
//! missing produce a [`ConfigError`] at startup instead of a panic later on.

use std::{fmt, str::FromStr};

use thiserror::Error;
use url::Url;

const DEFAULT_PORT: u16 = 3000;

/// Bacolod City, Negros Occidental
const DEFAULT_LATITUDE: f64 = 10.675;
const DEFAULT_LONGITUDE: f64 = 122.95;

const DEFAULT_EARTHQUAKE_API_URL: &str =
    "https://earthquake.phivolcs.dost.gov.ph/api/v1/earthquakes?limit=1";
const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DEFAULT_AIR_QUALITY_API_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";
const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Which SQL backend the data store talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Postgres,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" => Ok(Self::Postgres),
            t => Err(format!(
                "unsupported store type {t}, supported types are 'sqlite' and 'postgres'"
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub url: String,
}

impl StoreConfig {
    /// A private in-memory SQLite database, mostly useful for tests
    pub fn sqlite_in_memory() -> Self {
        Self {
            kind: StoreKind::Sqlite,
            url: "sqlite::memory:".to_string(),
        }
    }
}

/// Endpoints and location used by the hazard dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub earthquake_url: Url,
    pub weather_url: Url,
    pub air_quality_url: Url,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            earthquake_url: parse_default_url(DEFAULT_EARTHQUAKE_API_URL),
            weather_url: parse_default_url(DEFAULT_WEATHER_API_URL),
            air_quality_url: parse_default_url(DEFAULT_AIR_QUALITY_API_URL),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct AdvisorConfig {
    pub api_url: Url,
    pub api_key: String,
}

impl AdvisorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: parse_default_url(DEFAULT_GEMINI_API_URL),
            api_key: api_key.into(),
        }
    }
}

// Keep the key out of logs
impl fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreConfig,
    pub dashboard: DashboardConfig,
    pub advisor: AdvisorConfig,
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = StoreConfig {
            kind: parse_value(
                "GENERIC_DATA_STORE_TYPE",
                require(&lookup, "GENERIC_DATA_STORE_TYPE")?,
            )?,
            url: require(&lookup, "GENERIC_DATA_STORE_URL")?,
        };

        let advisor = AdvisorConfig {
            api_url: optional(&lookup, "GEMINI_API_URL", DEFAULT_GEMINI_API_URL)?,
            api_key: require(&lookup, "GEMINI_API_KEY")?,
        };

        let dashboard = DashboardConfig {
            earthquake_url: optional(&lookup, "EARTHQUAKE_API_URL", DEFAULT_EARTHQUAKE_API_URL)?,
            weather_url: optional(&lookup, "WEATHER_API_URL", DEFAULT_WEATHER_API_URL)?,
            air_quality_url: optional(&lookup, "AIR_QUALITY_API_URL", DEFAULT_AIR_QUALITY_API_URL)?,
            latitude: optional(&lookup, "LISLIP_LATITUDE", &DEFAULT_LATITUDE.to_string())?,
            longitude: optional(&lookup, "LISLIP_LONGITUDE", &DEFAULT_LONGITUDE.to_string())?,
        };

        let port = optional(&lookup, "LISLIP_PORT", &DEFAULT_PORT.to_string())?;

        Ok(Self {
            port,
            store,
            dashboard,
            advisor,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(key.to_string())),
    }
}

fn optional<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = match lookup(key) {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            tracing::debug!("{key} not set, using default: {default}");
            default.to_string()
        }
    };
    parse_value(key, value)
}

fn parse_value<T>(key: &str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        value: value.clone(),
        reason: e.to_string(),
    })
}

fn parse_default_url(url: &str) -> Url {
    // Only ever called with the constants at the top of this file
    Url::parse(url).unwrap_or_else(|e| panic!("invalid built-in URL {url}: {e}"))
}
