//! Server-side rendering of the dashboard, advisor and map

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};

use lislip::dashboard::{
    Card, DashboardPage, MapMarker, build_markers, fetch_latest_quake, get_advice,
};

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardCards {
    earthquake: Option<Card>,
    weather: Option<Card>,
    air_quality: Option<Card>,
}

/// Every card is always present; failures render as `unavailable`
pub(crate) async fn dashboard(State(state): State<AppState>) -> Json<DashboardCards> {
    let mut earthquake: Option<Card> = None;
    let mut weather: Option<Card> = None;
    let mut air_quality: Option<Card> = None;

    DashboardPage {
        earthquake: Some(&mut earthquake),
        weather: Some(&mut weather),
        air_quality: Some(&mut air_quality),
    }
    .initialize(state.fetcher.as_ref(), &state.dashboard)
    .await;

    Json(DashboardCards {
        earthquake,
        weather,
        air_quality,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdviceRequest {
    #[serde(default)]
    prompt: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdviceResponse {
    advice: String,
}

/// An unreadable body counts as an empty question
pub(crate) async fn advice(
    State(state): State<AppState>,
    request: Result<Json<AdviceRequest>, JsonRejection>,
) -> Json<AdviceResponse> {
    let prompt = match request {
        Ok(Json(request)) => request.prompt,
        Err(rejection) => {
            tracing::debug!("Unreadable advice request body: {}", rejection);
            String::new()
        }
    };
    let advice = get_advice(state.fetcher.as_ref(), &state.advisor, &prompt).await;
    Json(AdviceResponse { advice })
}

/// Evacuation centers plus the latest quake, if the feed answered
pub(crate) async fn markers(State(state): State<AppState>) -> Json<Vec<MapMarker>> {
    let quake = match fetch_latest_quake(state.fetcher.as_ref(), &state.dashboard).await {
        Ok(quake) => Some(quake),
        Err(e) => {
            tracing::error!("Could not fetch earthquake data for map: {}", e);
            None
        }
    };
    Json(build_markers(quake.as_ref()))
}
