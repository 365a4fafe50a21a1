use tracing::instrument;

use tgbot_client::{Payload, PayloadValue, RequestMethod, ResponseEnvelope};

use crate::error::{Error, ErrorKind, Result};

impl super::TelegramBotClient {
    /// Send a text message.
    #[instrument(skip(self, chat_id, text, options))]
    pub async fn send_message(
        &self,
        chat_id: impl Into<PayloadValue>,
        text: &str,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        let required = Payload::new().with("chat_id", chat_id).with("text", text);
        self.dispatch(RequestMethod::Post, "sendMessage", required, options)
            .await
    }

    /// Send a text message to the configured default chat.
    ///
    /// Fails with a `Config` error when no default chat is set.
    pub async fn send_message_to_default_chat(
        &self,
        text: &str,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        let chat_id = self.defaults.default_chat_id.clone().ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "no default chat configured (TELEGRAM_DEFAULT_CHAT_ID)".to_string(),
            ))
        })?;
        self.send_message(chat_id, text, options).await
    }

    /// Send a point on the map.
    #[instrument(skip(self, chat_id, options))]
    pub async fn send_location(
        &self,
        chat_id: impl Into<PayloadValue>,
        latitude: f64,
        longitude: f64,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        let required = Payload::new()
            .with("chat_id", chat_id)
            .with("latitude", latitude)
            .with("longitude", longitude);
        self.dispatch(RequestMethod::Post, "sendLocation", required, options)
            .await
    }

    /// Send a phone contact.
    #[instrument(skip(self, chat_id, phone_number, first_name, options))]
    pub async fn send_contact(
        &self,
        chat_id: impl Into<PayloadValue>,
        phone_number: &str,
        first_name: &str,
        options: Payload,
    ) -> Result<ResponseEnvelope> {
        let required = Payload::new()
            .with("chat_id", chat_id)
            .with("phone_number", phone_number)
            .with("first_name", first_name);
        self.dispatch(RequestMethod::Post, "sendContact", required, options)
            .await
    }
}
