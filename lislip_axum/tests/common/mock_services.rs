//! Axum-based stand-in for the third-party APIs

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::task::JoinHandle;
use url::Url;

/// Status and body each mocked endpoint answers with
#[derive(Clone)]
pub struct MockResponses {
    pub earthquake: (StatusCode, Value),
    pub weather: (StatusCode, Value),
    pub air_quality: (StatusCode, Value),
    pub advice: (StatusCode, Value),
}

impl MockResponses {
    /// Every service answers successfully
    pub fn healthy() -> Self {
        Self {
            earthquake: (
                StatusCode::OK,
                json!({
                    "data": [{
                        "magnitude": {"value": 4.2},
                        "location": "015 km N 80° W of Sipalay City",
                        "time": {"utc": "2024-05-01 12:00:00"},
                        "latitude": "9.78",
                        "longitude": "122.26"
                    }]
                }),
            ),
            weather: (
                StatusCode::OK,
                json!({"current": {"wind_speed_10m": 18.5, "weather_code": 2}}),
            ),
            air_quality: (StatusCode::OK, json!({"current": {"us_aqi": 42}})),
            advice: (
                StatusCode::OK,
                json!({"candidates": [{"content": {"parts": [{"text": "Prepare a go-bag."}]}}]}),
            ),
        }
    }

    /// Every service fails
    pub fn failing() -> Self {
        let error = (StatusCode::SERVICE_UNAVAILABLE, json!({"error": "down"}));
        Self {
            earthquake: error.clone(),
            weather: error.clone(),
            air_quality: error.clone(),
            advice: error,
        }
    }
}

#[derive(Clone)]
struct MockState {
    responses: MockResponses,
    advice_requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

pub struct MockServices {
    addr: SocketAddr,
    advice_requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    handle: JoinHandle<()>,
}

impl MockServices {
    pub async fn start(responses: MockResponses) -> Self {
        let advice_requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responses,
            advice_requests: advice_requests.clone(),
        };

        let app = Router::new()
            .route("/earthquakes", get(earthquakes))
            .route("/forecast", get(forecast))
            .route("/air-quality", get(air_quality))
            .route("/generate", post(generate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock services");
        let addr = listener.local_addr().expect("Mock services address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock services stopped unexpectedly");
        });

        Self {
            addr,
            advice_requests,
            handle,
        }
    }

    pub fn url(&self, path_and_query: &str) -> Url {
        format!("http://{}{}", self.addr, path_and_query)
            .parse()
            .expect("Valid mock URL")
    }

    /// `(key query parameter, body)` of every advice request received
    pub fn advice_requests(&self) -> Vec<(Option<String>, Value)> {
        self.advice_requests.lock().unwrap().clone()
    }
}

impl Drop for MockServices {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn earthquakes(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    let (status, body) = state.responses.earthquake;
    (status, Json(body))
}

async fn forecast(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    let (status, body) = state.responses.weather;
    (status, Json(body))
}

async fn air_quality(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    let (status, body) = state.responses.air_quality;
    (status, Json(body))
}

async fn generate(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state
        .advice_requests
        .lock()
        .unwrap()
        .push((query.get("key").cloned(), body));
    let (status, body) = state.responses.advice;
    (status, Json(body))
}
