//! Wind-based weather card fed by Open-Meteo

use serde::Deserialize;
use url::Url;

use crate::config::DashboardConfig;

use super::card::Card;
use super::errors::ExternalServiceError;
use super::fetch::DataFetcher;
use super::tier::{AlertTier, wind_tier};

pub const WEATHER_UNAVAILABLE: &str = "Could not load weather data.";

/// Current conditions at the configured location
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeatherReading {
    /// 10 m wind speed in km/h
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed_kmh: f64,
    /// WMO weather interpretation code
    pub weather_code: Option<u16>,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: WeatherReading,
}

impl WeatherReading {
    pub fn tier(&self) -> AlertTier {
        wind_tier(self.wind_speed_kmh)
    }
}

/// Forecast URL with the location and current-conditions query attached
pub fn weather_url(config: &DashboardConfig) -> Url {
    let mut url = config.weather_url.clone();
    url.query_pairs_mut()
        .append_pair("latitude", &config.latitude.to_string())
        .append_pair("longitude", &config.longitude.to_string())
        .append_pair("current", "wind_speed_10m,weather_code")
        .append_pair("wind_speed_unit", "kmh");
    url
}

/// Short description of a WMO weather code
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95..=99 => "Thunderstorm",
        _ => "Unknown conditions",
    }
}

pub fn weather_card(reading: &WeatherReading) -> Card {
    let tier = reading.tier();
    let heading = match tier {
        AlertTier::Safe => "Currently Safe",
        AlertTier::Warning => "Strong Winds",
        AlertTier::Danger => "Dangerous Winds",
    };
    let conditions = reading
        .weather_code
        .map(describe_weather_code)
        .unwrap_or("Unknown conditions");

    Card::Ready {
        heading: heading.to_string(),
        detail: format!(
            "{conditions} \u{2022} Wind {:.1} km/h",
            reading.wind_speed_kmh
        ),
        status: Some(tier.css_class()),
    }
}

pub async fn fetch_weather(
    fetcher: &dyn DataFetcher,
    config: &DashboardConfig,
) -> Result<WeatherReading, ExternalServiceError> {
    let body = fetcher.get_json(&weather_url(config)).await?;
    let response: ForecastResponse = serde_json::from_value(body)?;
    Ok(response.current)
}

pub async fn load_weather_card(fetcher: &dyn DataFetcher, config: &DashboardConfig) -> Card {
    match fetch_weather(fetcher, config).await {
        Ok(reading) => weather_card(&reading),
        Err(e) => {
            tracing::error!("Failed to fetch weather data: {}", e);
            Card::unavailable(WEATHER_UNAVAILABLE)
        }
    }
}
