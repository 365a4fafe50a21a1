use std::collections::HashMap;
use std::time::Duration;

use tgbot_api::{ErrorKind, Payload, TelegramBotClient, TelegramConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer};

use super::common::{endpoint_path, ok, TOKEN};

fn env(vars: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    move |key| map.get(key).cloned()
}

#[tokio::test]
async fn test_bot_from_environment() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .and(body_json(serde_json::json!({
            "chat_id": "682299441",
            "text": "Deployed"
        })))
        .respond_with(ok(serde_json::json!({"message_id": 60})))
        .expect(1)
        .mount(&server)
        .await;

    let config = TelegramConfig::from_lookup(env(&[
        ("TELEGRAM_BOT_TOKEN", TOKEN.to_string()),
        ("TELEGRAM_API_BASE_URL", server.uri()),
        ("TELEGRAM_HTTP_TIMEOUT", "5".to_string()),
        ("TELEGRAM_HTTP_RETRIES", "1".to_string()),
        ("TELEGRAM_DEFAULT_CHAT_ID", "682299441".to_string()),
    ]))
    .unwrap();

    assert_eq!(config.http_timeout, Duration::from_secs(5));

    let bot = TelegramBotClient::from_config(&config).unwrap();
    assert_eq!(bot.bot_token(), TOKEN);
    assert_eq!(bot.api_base_url(), server.uri());

    let envelope = bot
        .send_message_to_default_chat("Deployed", Payload::new())
        .await
        .unwrap();
    assert_eq!(envelope.result()["message_id"], 60);
}

#[test]
fn test_missing_token_in_environment() {
    let err = TelegramConfig::from_lookup(env(&[])).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
}

#[test]
fn test_empty_token_rejected_by_client() {
    let err = TelegramBotClient::new("").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
}
