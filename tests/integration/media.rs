use tgbot_api::{Attachment, InputFile, Payload};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

use super::common::{bot, content_type, endpoint_path, ok};

fn count(body: &[u8], needle: &str) -> usize {
    String::from_utf8_lossy(body).matches(needle).count()
}

#[tokio::test]
async fn test_send_photo_has_exactly_one_binary_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendPhoto")))
        .respond_with(ok(serde_json::json!({
            "message_id": 30,
            "photo": [{"file_id": "AgAC", "width": 90, "height": 90}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let photo = Attachment::new("photo.jpg", vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10])
        .with_mime_type("image/jpeg");

    let envelope = bot(&server)
        .send_photo(
            "682299441",
            InputFile::Upload(photo),
            Payload::new()
                .with("caption", "Test photo")
                .with("has_spoiler", false),
        )
        .await
        .unwrap();
    assert_eq!(envelope.result()["photo"][0]["file_id"], "AgAC");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(content_type(&received[0]).starts_with("multipart/form-data; boundary="));

    let body = &received[0].body;
    assert_eq!(count(body, "filename=\""), 1);
    assert_eq!(count(body, "name=\"photo\"; filename=\"photo.jpg\""), 1);
    assert_eq!(count(body, "Content-Type: image/jpeg"), 1);
    assert_eq!(count(body, "name=\"caption\""), 1);
    assert_eq!(count(body, "name=\"has_spoiler\""), 1);
}

#[tokio::test]
async fn test_send_document_from_disk() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendDocument")))
        .respond_with(ok(serde_json::json!({"message_id": 31})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "release notes").unwrap();

    let document = Attachment::from_path(&file).await.unwrap();
    bot(&server)
        .send_document("682299441", document.into(), Payload::new())
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let body = &received[0].body;
    assert_eq!(count(body, "name=\"document\"; filename=\"notes.txt\""), 1);
    assert_eq!(count(body, "release notes"), 1);
}

#[tokio::test]
async fn test_missing_attachment_file_fails_before_sending() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let err = Attachment::from_path(dir.path().join("missing.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, tgbot_api::ErrorKind::Config(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_video_by_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoint_path("sendVideo")))
        .and(wiremock::matchers::body_json(serde_json::json!({
            "chat_id": "682299441",
            "video": "https://example.com/video.mp4"
        })))
        .respond_with(ok(serde_json::json!({"message_id": 32})))
        .expect(1)
        .mount(&server)
        .await;

    bot(&server)
        .send_video(
            "682299441",
            InputFile::url("https://example.com/video.mp4"),
            Payload::new(),
        )
        .await
        .unwrap();
}
