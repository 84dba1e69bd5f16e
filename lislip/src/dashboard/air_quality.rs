use serde::Deserialize;
use url::Url;

use crate::config::DashboardConfig;

use super::card::Card;
use super::errors::ExternalServiceError;
use super::fetch::DataFetcher;
use super::tier::{AqiTier, aqi_tier};

pub const AIR_QUALITY_UNAVAILABLE: &str = "Could not load air quality data.";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AirQualityReading {
    /// US Air Quality Index
    pub us_aqi: f64,
}

#[derive(Deserialize)]
struct AirQualityResponse {
    current: AirQualityReading,
}

impl AirQualityReading {
    pub fn tier(&self) -> AqiTier {
        aqi_tier(self.us_aqi)
    }
}

pub fn air_quality_url(config: &DashboardConfig) -> Url {
    let mut url = config.air_quality_url.clone();
    url.query_pairs_mut()
        .append_pair("latitude", &config.latitude.to_string())
        .append_pair("longitude", &config.longitude.to_string())
        .append_pair("current", "us_aqi");
    url
}

pub fn air_quality_card(reading: &AirQualityReading) -> Card {
    let tier = reading.tier();
    Card::Ready {
        heading: format!("Air Quality: {}", tier.label()),
        detail: format!("AQI {}", reading.us_aqi.round()),
        status: Some(tier.css_class()),
    }
}

pub async fn fetch_air_quality(
    fetcher: &dyn DataFetcher,
    config: &DashboardConfig,
) -> Result<AirQualityReading, ExternalServiceError> {
    let body = fetcher.get_json(&air_quality_url(config)).await?;
    let response: AirQualityResponse = serde_json::from_value(body)?;
    Ok(response.current)
}

pub async fn load_air_quality_card(fetcher: &dyn DataFetcher, config: &DashboardConfig) -> Card {
    match fetch_air_quality(fetcher, config).await {
        Ok(reading) => air_quality_card(&reading),
        Err(e) => {
            tracing::error!("Failed to fetch air quality data: {}", e);
            Card::unavailable(AIR_QUALITY_UNAVAILABLE)
        }
    }
}
