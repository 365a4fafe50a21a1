use tracing::instrument;

use tgbot_client::{Payload, RequestMethod, ResponseEnvelope};

use crate::error::{Error, ErrorKind, Result};

impl super::TelegramBotClient {
    /// Register an HTTPS URL that will receive updates.
    #[instrument(skip(self, url, options))]
    pub async fn set_webhook(&self, url: &str, options: Payload) -> Result<ResponseEnvelope> {
        let required = Payload::new().with("url", url);
        self.dispatch(RequestMethod::Post, "setWebhook", required, options)
            .await
    }

    /// Register the configured webhook URL together with the configured
    /// `max_connections` and `allowed_updates`.
    ///
    /// Fails with a `Config` error when no webhook URL is set.
    pub async fn set_webhook_from_config(&self, options: Payload) -> Result<ResponseEnvelope> {
        let url = self.defaults.webhook_url.as_deref().ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "no webhook URL configured (TELEGRAM_WEBHOOK_URL)".to_string(),
            ))
        })?;

        let mut configured =
            Payload::new().with("max_connections", self.defaults.webhook_max_connections);
        if !self.defaults.webhook_allowed_updates.is_empty() {
            configured.try_insert("allowed_updates", &self.defaults.webhook_allowed_updates)?;
        }
        configured.merge(options);

        self.set_webhook(url, configured).await
    }

    /// Get the current webhook status.
    #[instrument(skip(self))]
    pub async fn get_webhook_info(&self) -> Result<ResponseEnvelope> {
        self.dispatch(
            RequestMethod::Get,
            "getWebhookInfo",
            Payload::new(),
            Payload::new(),
        )
        .await
    }

    /// Remove the webhook integration.
    #[instrument(skip(self, options))]
    pub async fn delete_webhook(&self, options: Payload) -> Result<ResponseEnvelope> {
        self.dispatch(RequestMethod::Post, "deleteWebhook", Payload::new(), options)
            .await
    }
}
