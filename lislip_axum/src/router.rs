//! Router for every lislip HTTP endpoint

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

const LIVENESS_TEXT: &str = "LISLIP Backend Server is running!";

/// Create the application router
///
/// - `GET /`: liveness text
/// - `POST /api/safe`: "I am safe" notification
/// - `GET /api/dashboard`: hazard cards
/// - `POST /api/advice`: preparedness advice
/// - `GET /api/map/markers`: evacuation-center and quake markers
///
/// CORS is permissive since the static front-end is served from elsewhere.
pub fn lislip_router(state: AppState) -> Router {
    lislip_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`lislip_router`] without the HTTP tracing middleware
pub fn lislip_router_no_trace(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/safe", post(super::safe::notify_safe))
        .route("/api/dashboard", get(super::dashboard::dashboard))
        .route("/api/advice", post(super::dashboard::advice))
        .route("/api/map/markers", get(super::dashboard::markers))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}
