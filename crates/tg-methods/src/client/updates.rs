use tracing::instrument;

use tgbot_client::{Payload, RequestMethod, ResponseEnvelope};

use crate::error::Result;

impl super::TelegramBotClient {
    /// Receive incoming updates by long polling.
    ///
    /// `offset`, `limit`, `timeout` and `allowed_updates` are passed as
    /// options. `allowed_updates` is a list and therefore cannot be sent
    /// with GET; use [`TelegramClient::post`](tgbot_client::TelegramClient::post)
    /// on `getUpdates` when it is needed.
    #[instrument(skip(self, options))]
    pub async fn get_updates(&self, options: Payload) -> Result<ResponseEnvelope> {
        self.dispatch(RequestMethod::Get, "getUpdates", Payload::new(), options)
            .await
    }

    /// [`get_updates`](Self::get_updates) with the common polling parameters.
    pub async fn get_updates_with(
        &self,
        offset: Option<i64>,
        limit: Option<u32>,
        timeout: Option<u32>,
    ) -> Result<ResponseEnvelope> {
        let mut options = Payload::new();
        if let Some(offset) = offset {
            options.insert("offset", offset);
        }
        if let Some(limit) = limit {
            options.insert("limit", limit);
        }
        if let Some(timeout) = timeout {
            options.insert("timeout", timeout);
        }
        self.get_updates(options).await
    }
}
