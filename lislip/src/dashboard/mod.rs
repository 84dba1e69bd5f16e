//! Headless dashboard and advisory clients
//!
//! Pages are described by the slots they expose ([`CardSlot`], [`TextSlot`],
//! [`Checkbox`]) and receive a [`DataFetcher`] for all network access, so the
//! rendering logic runs the same under a browser shim, the HTTP server, or a
//! test double.
//!
//! - `advisor`: generative-AI preparedness advice
//! - `air_quality`, `earthquake`, `weather`: hazard cards
//! - `binding`: page objects wiring slots to the initializers
//! - `checklist`: prep-kit checkbox persistence
//! - `map`: evacuation-center and quake markers
//! - `tier`: threshold buckets shared by the cards

mod advisor;
mod air_quality;
mod binding;
mod card;
mod checklist;
mod earthquake;
mod errors;
mod fetch;
mod map;
mod tier;
mod weather;

pub use advisor::{
    CONNECTION_FAILURE_MESSAGE, EMPTY_PROMPT_MESSAGE, LOADING_MESSAGE,
    MALFORMED_RESPONSE_MESSAGE, build_advice_prompt, extract_advice, get_advice,
};
pub use air_quality::{
    AIR_QUALITY_UNAVAILABLE, AirQualityReading, air_quality_card, air_quality_url,
    fetch_air_quality, load_air_quality_card,
};
pub use binding::{AdvisorPanel, DashboardPage};
pub use card::{Card, CardSlot, TextSlot};
pub use checklist::{Checkbox, Checklist, ChecklistItem, KeyValueStorage, MemoryStorage};
pub use earthquake::{
    EARTHQUAKE_UNAVAILABLE, Quake, fetch_latest_quake, format_time_ago, load_earthquake_card,
    quake_card,
};
pub use errors::ExternalServiceError;
pub use fetch::{DataFetcher, HttpFetcher};
pub use map::{EVACUATION_CENTERS, EvacuationCenter, MapMarker, MarkerKind, build_markers};
pub use tier::{
    AQI_MODERATE_ABOVE, AQI_SENSITIVE_ABOVE, AQI_UNHEALTHY_ABOVE, AlertTier, AqiTier,
    WIND_DANGER_ABOVE_KMH, WIND_WARNING_ABOVE_KMH, aqi_tier, wind_tier,
};
pub use weather::{
    WEATHER_UNAVAILABLE, WeatherReading, describe_weather_code, fetch_weather, load_weather_card,
    weather_card, weather_url,
};
