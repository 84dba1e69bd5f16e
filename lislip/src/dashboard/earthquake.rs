//! Latest-earthquake card fed by the PHIVOLCS feed

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::config::DashboardConfig;

use super::card::Card;
use super::errors::ExternalServiceError;
use super::fetch::DataFetcher;

pub const EARTHQUAKE_UNAVAILABLE: &str = "Could not load live earthquake data.";

/// Most recent event reported by the feed
#[derive(Debug, Clone, PartialEq)]
pub struct Quake {
    /// Magnitude as the feed renders it, e.g. `"5.2"`
    pub magnitude: String,
    pub location: String,
    pub time: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Quake {
    /// Parse `{data: [{magnitude: {value}, location, time: {utc}, ...}]}`
    pub(crate) fn from_feed(feed: &Value) -> Result<Self, ExternalServiceError> {
        let latest = feed
            .get("data")
            .and_then(Value::as_array)
            .and_then(|events| events.first())
            .ok_or_else(|| malformed("feed has no events"))?;

        let magnitude = match latest.pointer("/magnitude/value") {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(value) => format!("{value}"),
                None => return Err(malformed("magnitude out of range")),
            },
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return Err(malformed("missing magnitude")),
        };

        let location = latest
            .get("location")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("missing location"))?
            .to_string();

        let time = latest
            .pointer("/time/utc")
            .and_then(Value::as_str)
            .and_then(parse_utc)
            .ok_or_else(|| malformed("missing or unreadable time"))?;

        Ok(Self {
            magnitude,
            location,
            time,
            latitude: latest.get("latitude").and_then(lenient_f64),
            longitude: latest.get("longitude").and_then(lenient_f64),
        })
    }
}

fn malformed(reason: &str) -> ExternalServiceError {
    ExternalServiceError::Malformed(format!("earthquake feed: {reason}"))
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Human-readable age of an event
///
/// Minutes are rounded; from 60 minutes on, whole hours are shown instead.
pub fn format_time_ago(now: DateTime<Utc>, time: DateTime<Utc>) -> String {
    let elapsed_ms = (now - time).num_milliseconds() as f64;
    let minutes = (elapsed_ms / 60_000.0 + 0.5).floor() as i64;
    if minutes >= 60 {
        format!("{} hour(s) ago", minutes / 60)
    } else {
        format!("{minutes} minutes ago")
    }
}

pub fn quake_card(quake: &Quake, now: DateTime<Utc>) -> Card {
    Card::Ready {
        heading: format!("Recent Quake: M {}", quake.magnitude),
        detail: format!(
            "{} \u{2022} {}",
            quake.location,
            format_time_ago(now, quake.time)
        ),
        status: None,
    }
}

pub async fn fetch_latest_quake(
    fetcher: &dyn DataFetcher,
    config: &DashboardConfig,
) -> Result<Quake, ExternalServiceError> {
    let feed = fetcher.get_json(&config.earthquake_url).await?;
    Quake::from_feed(&feed)
}

/// Fetch the latest quake and turn it into a card, falling back on any error
pub async fn load_earthquake_card(fetcher: &dyn DataFetcher, config: &DashboardConfig) -> Card {
    match fetch_latest_quake(fetcher, config).await {
        Ok(quake) => {
            tracing::debug!(
                magnitude = %quake.magnitude,
                location = %quake.location,
                "Loaded latest quake"
            );
            quake_card(&quake, Utc::now())
        }
        Err(e) => {
            tracing::error!("Failed to fetch live earthquake data: {}", e);
            Card::unavailable(EARTHQUAKE_UNAVAILABLE)
        }
    }
}
