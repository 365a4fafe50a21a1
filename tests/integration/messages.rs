use tgbot_api::Payload;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer};

use super::common::{bot, content_type, endpoint_path, ok};

#[tokio::test]
async fn test_send_message_is_plain_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .and(body_json(serde_json::json!({
            "chat_id": "682299441",
            "text": "Test message"
        })))
        .respond_with(ok(serde_json::json!({
            "message_id": 123,
            "chat": {"id": 682299441, "type": "private"},
            "text": "Test message"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = bot(&server)
        .send_message("682299441", "Test message", Payload::new())
        .await
        .expect("send_message should succeed");

    assert!(envelope.ok);
    assert_eq!(envelope.result()["message_id"], 123);
    assert_eq!(envelope.result()["chat"]["type"], "private");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(content_type(&received[0]), "application/json");
}

#[tokio::test]
async fn test_send_location_and_contact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendLocation")))
        .and(body_json(serde_json::json!({
            "chat_id": "682299441",
            "latitude": "48.8584",
            "longitude": "2.2945",
            "live_period": "60"
        })))
        .respond_with(ok(serde_json::json!({"message_id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendContact")))
        .and(body_json(serde_json::json!({
            "chat_id": "682299441",
            "phone_number": "+123456789",
            "first_name": "John"
        })))
        .respond_with(ok(serde_json::json!({"message_id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let bot = bot(&server);

    let location = bot
        .send_location(
            "682299441",
            48.8584,
            2.2945,
            Payload::new().with("live_period", 60),
        )
        .await
        .unwrap();
    assert_eq!(location.result()["message_id"], 1);

    let contact = bot
        .send_contact("682299441", "+123456789", "John", Payload::new())
        .await
        .unwrap();
    assert_eq!(contact.result()["message_id"], 2);
}

#[tokio::test]
async fn test_updates_long_polling() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoint_path("getUpdates")))
        .and(wiremock::matchers::query_param("offset", "42"))
        .respond_with(ok(serde_json::json!([
            {"update_id": 42, "message": {"message_id": 7, "text": "/start"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = bot(&server)
        .get_updates_with(Some(42), None, None)
        .await
        .unwrap();

    assert_eq!(envelope.result()[0]["update_id"], 42);
    assert_eq!(envelope.result()[0]["message"]["text"], "/start");
}
