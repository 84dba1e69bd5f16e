//! Severity buckets derived from numeric readings
//!
//! Every threshold is exclusive: a reading has to exceed it to escalate.

use serde::Serialize;

pub const WIND_WARNING_ABOVE_KMH: f64 = 39.0;
pub const WIND_DANGER_ABOVE_KMH: f64 = 61.0;

pub const AQI_MODERATE_ABOVE: f64 = 50.0;
pub const AQI_SENSITIVE_ABOVE: f64 = 100.0;
pub const AQI_UNHEALTHY_ABOVE: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTier {
    Safe,
    Warning,
    Danger,
}

impl AlertTier {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Safe => "status-safe",
            Self::Warning => "status-warning",
            Self::Danger => "status-danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiTier {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
}

impl AqiTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "aqi-good",
            Self::Moderate => "aqi-moderate",
            Self::UnhealthyForSensitive => "aqi-sensitive",
            Self::Unhealthy => "aqi-unhealthy",
        }
    }
}

pub fn wind_tier(speed_kmh: f64) -> AlertTier {
    if speed_kmh > WIND_DANGER_ABOVE_KMH {
        AlertTier::Danger
    } else if speed_kmh > WIND_WARNING_ABOVE_KMH {
        AlertTier::Warning
    } else {
        AlertTier::Safe
    }
}

pub fn aqi_tier(aqi: f64) -> AqiTier {
    if aqi > AQI_UNHEALTHY_ABOVE {
        AqiTier::Unhealthy
    } else if aqi > AQI_SENSITIVE_ABOVE {
        AqiTier::UnhealthyForSensitive
    } else if aqi > AQI_MODERATE_ABOVE {
        AqiTier::Moderate
    } else {
        AqiTier::Good
    }
}
