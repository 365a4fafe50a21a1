use tracing::instrument;

use tgbot_client::{Payload, PayloadValue, RequestMethod, ResponseEnvelope};

use crate::error::Result;
use crate::types::InputFile;

impl super::TelegramBotClient {
    /// Send a photo by URL, `file_id`, or upload.
    #[instrument(skip(self, chat_id, photo, options), fields(upload = photo.is_upload()))]
    pub async fn send_photo(
        &self,
        chat_id: impl Into<PayloadValue>,
        photo: InputFile,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        self.send_media("sendPhoto", "photo", chat_id.into(), photo, options)
            .await
    }

    /// Send a video by URL, `file_id`, or upload.
    #[instrument(skip(self, chat_id, video, options), fields(upload = video.is_upload()))]
    pub async fn send_video(
        &self,
        chat_id: impl Into<PayloadValue>,
        video: InputFile,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        self.send_media("sendVideo", "video", chat_id.into(), video, options)
            .await
    }

    /// Send a general file by URL, `file_id`, or upload.
    #[instrument(skip(self, chat_id, document, options), fields(upload = document.is_upload()))]
    pub async fn send_document(
        &self,
        chat_id: impl Into<PayloadValue>,
        document: InputFile,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        self.send_media("sendDocument", "document", chat_id.into(), document, options)
            .await
    }

    // An upload lands in the payload as a binary value, which switches the
    // request to multipart.
    async fn send_media(
        &self,
        endpoint: &str,
        field: &str,
        chat_id: PayloadValue,
        file: InputFile,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        let required = Payload::new().with("chat_id", chat_id).with(field, file);
        self.dispatch(RequestMethod::Post, endpoint, required, options)
            .await
    }
}
