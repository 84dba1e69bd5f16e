use lislip::dashboard::{CONNECTION_FAILURE_MESSAGE, MALFORMED_RESPONSE_MESSAGE};
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::common::test_server::TEST_API_KEY;
use crate::common::{MockResponses, MockServices, TestServer, seeded_store};

async fn get_json(server: &TestServer, path: &str) -> Value {
    let response = server.client().get(server.url(path)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

async fn ask(server: &TestServer, body: Value) -> Value {
    let response = server
        .client()
        .post(server.url("/api/advice"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_dashboard_with_healthy_services() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let cards = get_json(&server, "/api/dashboard").await;

    assert_eq!(cards["earthquake"]["state"], "ready");
    assert_eq!(cards["earthquake"]["heading"], "Recent Quake: M 4.2");
    assert!(
        cards["earthquake"]["detail"]
            .as_str()
            .unwrap()
            .starts_with("015 km N 80° W of Sipalay City • ")
    );
    assert_eq!(
        cards["weather"],
        json!({
            "state": "ready",
            "heading": "Currently Safe",
            "detail": "Partly cloudy • Wind 18.5 km/h",
            "status": "status-safe"
        })
    );
    assert_eq!(
        cards["airQuality"],
        json!({
            "state": "ready",
            "heading": "Air Quality: Good",
            "detail": "AQI 42",
            "status": "aqi-good"
        })
    );
}

#[tokio::test]
async fn test_dashboard_with_failing_services() {
    let mock = MockServices::start(MockResponses::failing()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let cards = get_json(&server, "/api/dashboard").await;

    assert_eq!(
        cards,
        json!({
            "earthquake": {
                "state": "unavailable",
                "message": "Could not load live earthquake data."
            },
            "weather": {"state": "unavailable", "message": "Could not load weather data."},
            "airQuality": {"state": "unavailable", "message": "Could not load air quality data."}
        })
    );
}

#[tokio::test]
async fn test_one_failing_service_leaves_others_intact() {
    let mut responses = MockResponses::healthy();
    responses.weather = (StatusCode::OK, json!({"unexpected": true}));
    let mock = MockServices::start(responses).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let cards = get_json(&server, "/api/dashboard").await;

    assert_eq!(cards["weather"]["state"], "unavailable");
    assert_eq!(cards["earthquake"]["state"], "ready");
    assert_eq!(cards["airQuality"]["state"], "ready");
}

#[tokio::test]
async fn test_advice_round_trip() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let body = ask(&server, json!({"prompt": "What should I do during a typhoon?"})).await;

    assert_eq!(body, json!({"advice": "Prepare a go-bag."}));
    let requests = mock.advice_requests();
    assert_eq!(requests.len(), 1);
    let (key, sent) = &requests[0];
    assert_eq!(key.as_deref(), Some(TEST_API_KEY));
    assert_eq!(sent["contents"][0]["role"], "user");
    assert!(
        sent["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("\"What should I do during a typhoon?\"")
    );
}

#[tokio::test]
async fn test_advice_fallbacks() {
    let mock = MockServices::start(MockResponses::failing()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let body = ask(&server, json!({"prompt": "Earthquake drill?"})).await;
    assert_eq!(body["advice"], CONNECTION_FAILURE_MESSAGE);

    let body = ask(&server, json!({"prompt": "  "})).await;
    assert_eq!(body["advice"], "Please enter a question first.");
    assert_eq!(mock.advice_requests().len(), 1);
}

#[tokio::test]
async fn test_advice_with_unexpected_format() {
    let mut responses = MockResponses::healthy();
    responses.advice = (StatusCode::OK, json!({"candidates": []}));
    let mock = MockServices::start(responses).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let body = ask(&server, json!({"prompt": "Tsunami?"})).await;

    assert_eq!(body["advice"], MALFORMED_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn test_map_markers() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let markers = get_json(&server, "/api/map/markers").await;
    let markers = markers.as_array().unwrap();

    assert_eq!(markers.len(), 4);
    assert_eq!(markers[0]["kind"], "evacuation_center");
    assert_eq!(markers[0]["title"], "Bacolod City Government Center");
    assert_eq!(
        markers[3],
        json!({
            "kind": "earthquake",
            "latitude": 9.78,
            "longitude": 122.26,
            "title": "Recent Quake: M 4.2",
            "description": "015 km N 80° W of Sipalay City."
        })
    );
}

#[tokio::test]
async fn test_map_markers_without_quake_feed() {
    let mock = MockServices::start(MockResponses::failing()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let markers = get_json(&server, "/api/map/markers").await;

    assert_eq!(markers.as_array().unwrap().len(), 3);
}
