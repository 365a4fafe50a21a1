use tgbot_api::{BotDefaults, Payload};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer};

use super::common::{bot, endpoint_path, ok};

#[tokio::test]
async fn test_webhook_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("setWebhook")))
        .and(body_json(serde_json::json!({"url": "https://example.com/webhook"})))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(endpoint_path("getWebhookInfo")))
        .respond_with(ok(serde_json::json!({
            "url": "https://example.com/webhook",
            "has_custom_certificate": false,
            "pending_update_count": 3,
            "max_connections": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("deleteWebhook")))
        .and(body_json(serde_json::json!({"drop_pending_updates": "true"})))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let bot = bot(&server);

    let set = bot
        .set_webhook("https://example.com/webhook", Payload::new())
        .await
        .unwrap();
    assert_eq!(set.result(), &serde_json::json!(true));

    let info = bot.get_webhook_info().await.unwrap();
    assert_eq!(info.result()["pending_update_count"], 3);

    let deleted = bot
        .delete_webhook(Payload::new().with("drop_pending_updates", true))
        .await
        .unwrap();
    assert!(deleted.ok);
}

#[tokio::test]
async fn test_set_webhook_from_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("setWebhook")))
        .and(body_json(serde_json::json!({
            "url": "https://example.com/hook",
            "max_connections": "40",
            "secret_token": "s3cret"
        })))
        .respond_with(ok(serde_json::json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let bot = bot(&server).with_defaults(BotDefaults {
        webhook_url: Some("https://example.com/hook".to_string()),
        ..BotDefaults::default()
    });

    bot.set_webhook_from_config(Payload::new().with("secret_token", "s3cret"))
        .await
        .unwrap();
}
