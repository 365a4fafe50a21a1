use futures::future::join_all;
use tgbot_api::Payload;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

use super::common::{bot, endpoint_path, ok};

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendMessage")))
        .respond_with(ok(serde_json::json!({"message_id": 1})))
        .expect(20)
        .mount(&server)
        .await;

    let bot = bot(&server);

    let calls = (0..20).map(|i| {
        let bot = bot.clone();
        async move {
            bot.send_message(682299441, &format!("message {i}"), Payload::new())
                .await
        }
    });

    let results = join_all(calls).await;
    assert!(results.iter().all(|r| r.is_ok()));
}

#[tokio::test]
async fn test_client_moves_across_tasks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoint_path("getUpdates")))
        .respond_with(ok(serde_json::json!([])))
        .expect(4)
        .mount(&server)
        .await;

    let bot = bot(&server);

    let handles: Vec<_> = (0..4)
        .map(|offset| {
            let bot = bot.clone();
            tokio::spawn(async move { bot.get_updates_with(Some(offset), Some(1), None).await })
        })
        .collect();

    for handle in handles {
        let envelope = handle.await.expect("task should not panic").unwrap();
        assert_eq!(envelope.result(), &serde_json::json!([]));
    }
}
