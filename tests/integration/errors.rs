use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tgbot_api::{
    BotCredentials, ClientConfig, ErrorKind, Payload, RetryConfig, TelegramBotClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{
    api_error, bot, bot_with_attempts, endpoint_path, init_tracing, ok, TOKEN,
};

#[tokio::test]
async fn test_api_error_is_attempted_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .respond_with(api_error(400, 400, "Bad Request: chat not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = bot(&server)
        .send_message("invalid_chat_id", "Test message", Payload::new())
        .await
        .unwrap_err();

    assert!(err.is_api_error());
    assert_eq!(err.error_code(), Some(400));
    assert_eq!(
        err.to_string(),
        "Telegram API error: Bad Request: chat not found (Code: 400)"
    );
}

#[tokio::test]
async fn test_flood_control_surfaces_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 3",
            "parameters": {"retry_after": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = bot(&server)
        .send_message(1, "spam", Payload::new())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some(429));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_transient_503_is_retried() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .respond_with(move |_: &wiremock::Request| {
            if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "ok": true,
                    "result": {"message_id": 50}
                }))
            }
        })
        .mount(&server)
        .await;

    let envelope = bot(&server)
        .send_message(1, "retry me", Payload::new())
        .await
        .unwrap();

    assert_eq!(envelope.result()["message_id"], 50);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_persistent_500_exhausts_attempt_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let err = bot_with_attempts(&server, 4)
        .send_message(1, "hello", Payload::new())
        .await
        .unwrap_err();

    assert!(err.is_transport_error());
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_missing_ok_is_malformed_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"invalid": true})))
        .expect(1)
        .mount(&server)
        .await;

    let err = bot(&server).get_webhook_info().await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn test_client_error_status_without_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = bot(&server)
        .delete_webhook(Payload::new())
        .await
        .unwrap_err();

    assert!(err.is_transport_error());
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_invalid_payload_never_reaches_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ok(serde_json::json!(true)))
        .expect(0)
        .mount(&server)
        .await;

    let err = bot(&server)
        .send_location(1, 0.0, f64::INFINITY, Payload::new())
        .await
        .unwrap_err();

    match err.kind {
        ErrorKind::InvalidPayloadValue { field, .. } => assert_eq!(field, "longitude"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_description_is_passed_through() {
    let server = MockServer::start().await;
    let description = "Bad Request: message 123456:abcdefghij not found";

    Mock::given(method("POST"))
        .respond_with(api_error(400, 400, description))
        .expect(1)
        .mount(&server)
        .await;

    let err = bot(&server)
        .send_message(1, "hello", Payload::new())
        .await
        .unwrap_err();

    match err.kind {
        ErrorKind::Api {
            description: got, ..
        } => assert_eq!(got, description),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_errors_never_contain_token() {
    init_tracing();
    // Nothing listens on port 1.
    let bot = TelegramBotClient::with_config(
        BotCredentials::with_base_url(TOKEN, "http://127.0.0.1:1").unwrap(),
        ClientConfig::builder()
            .with_timeout(Duration::from_secs(2))
            .with_retry(RetryConfig::no_retry())
            .build(),
    )
    .unwrap();

    let err = bot
        .send_message(1, "hello", Payload::new())
        .await
        .unwrap_err();

    let secret = TOKEN.split(':').nth(1).unwrap();
    let rendered = format!("{err} {err:?}");
    assert!(!rendered.contains(secret), "{rendered}");
    assert!(err.is_transport_error());
    assert_eq!(err.status(), None);
}
