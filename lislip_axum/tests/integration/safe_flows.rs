use reqwest::StatusCode;
use serde_json::{Value, json};

use lislip::{NewAccount, NewContact};

use crate::common::{MockResponses, MockServices, TestServer, empty_store, seeded_store};

async fn post_safe(server: &TestServer, body: reqwest::Body) -> (StatusCode, Value) {
    let response = server
        .client()
        .post(server.url("/api/safe"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("Request failed");
    let status = response.status();
    let body = response.json::<Value>().await.expect("JSON body");
    (status, body)
}

#[tokio::test]
async fn test_liveness() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let response = server.client().get(server.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "LISLIP Backend Server is running!"
    );
}

#[tokio::test]
async fn test_seeded_user_is_notified() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let (status, body) = post_safe(&server, json!({"userId": 1}).to_string().into()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Notification for John Doe sent successfully (simulated)."})
    );
}

#[tokio::test]
async fn test_missing_user_id_is_bad_request() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    for body in [
        "{}",
        r#"{"userId": null}"#,
        r#"{"userId": 0}"#,
        r#"{"userId": ""}"#,
        r#"{"userId": false}"#,
        "not json",
        "",
    ] {
        let (status, response) = post_safe(&server, body.to_string().into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert_eq!(response["message"], "User ID is required.", "body {body:?}");
    }
}

#[tokio::test]
async fn test_non_integer_user_id_is_bad_request() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    for body in [json!({"userId": "abc"}), json!({"userId": 1.5}), json!({"userId": [1]})] {
        let (status, response) = post_safe(&server, body.to_string().into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "User ID must be an integer.");
    }
}

#[tokio::test]
async fn test_unknown_user_or_no_contact_is_not_found() {
    let store = seeded_store().await;
    let lonely = store
        .insert_account(NewAccount::new("Juan Luna", "juan@example.com"))
        .await
        .unwrap();
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(store, &mock).await;

    for user_id in [json!(999), json!(-1), json!(lonely.id)] {
        let (status, response) =
            post_safe(&server, json!({"userId": user_id}).to_string().into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "userId {user_id}");
        assert_eq!(response["message"], "User or emergency contact not found.");
    }
}

#[tokio::test]
async fn test_string_user_id_with_contact() {
    let store = seeded_store().await;
    let account = store
        .insert_account(NewAccount::new("Melchora Aquino", "melchora@example.com"))
        .await
        .unwrap();
    store
        .insert_contact(NewContact::new(account.id, "Tandang Sora").with_phone("09171234567"))
        .await
        .unwrap();
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(store, &mock).await;

    let (status, response) = post_safe(
        &server,
        json!({"userId": account.id.to_string()}).to_string().into(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response["message"],
        "Notification for Melchora Aquino sent successfully (simulated)."
    );
}

#[tokio::test]
async fn test_storage_fault_is_generic_server_error() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    // Tables were never created, so every lookup fails
    let server = TestServer::start(empty_store().await, &mock).await;

    let (status, response) = post_safe(&server, json!({"userId": 1}).to_string().into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response, json!({"message": "An error occurred on the server."}));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let mock = MockServices::start(MockResponses::healthy()).await;
    let server = TestServer::start(seeded_store().await, &mock).await;

    let response = server
        .client()
        .get(server.url("/"))
        .header("origin", "http://frontend.test")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
