//! Core HTTP client with retry, compression, and Telegram envelope handling.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, TransportRequest};
use crate::response::{RawResponse, ResponseEnvelope, ResponseNormalizer};
use crate::retry::RetryPolicy;

/// HTTP transport for the Bot API with built-in retry and response parsing.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct TgHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl TgHttpClient {
    /// Create a new HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request with automatic retry handling.
    ///
    /// Only retryable transport failures are repeated. Once the attempt
    /// budget is spent the last transport error is returned.
    #[instrument(skip(self, request), fields(method = ?request.method(), endpoint = %request.endpoint()))]
    pub async fn execute(&self, request: &TransportRequest) -> Result<ResponseEnvelope> {
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            let result = match self.execute_once(request).await {
                Ok(raw) => ResponseNormalizer::parse_raw(&raw),
                Err(err) => Err(err),
            };

            match result {
                Ok(envelope) => return Ok(envelope),
                Err(err) if err.is_retryable() => {
                    let Some(ref mut policy) = retry_policy else {
                        return Err(err);
                    };

                    match policy.next_delay() {
                        Some(delay) => {
                            warn!(
                                attempt = policy.attempt(),
                                delay_ms = delay.as_millis() as u64,
                                error = %err,
                                "Request failed, retrying"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            warn!(
                                attempts = policy.attempt(),
                                error = %err,
                                "Giving up after exhausting retries"
                            );
                            return Err(err);
                        }
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Execute a single request without retry logic.
    async fn execute_once(&self, request: &TransportRequest) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(request.method().to_reqwest(), request.url());

        req = match request.body() {
            RequestBody::Empty => req,
            RequestBody::Json(value) => req.json(value),
            RequestBody::Form(encoded) => req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encoded.clone()),
            RequestBody::Multipart { fields, files } => {
                // A multipart form is consumed on send, so each attempt builds its own.
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                for (name, attachment) in files {
                    let content = attachment.content();
                    let mut part = Part::stream_with_length(
                        reqwest::Body::from(content.clone()),
                        content.len() as u64,
                    )
                    .file_name(attachment.file_name().to_string());
                    if let Some(mime) = attachment.mime_type() {
                        part = part.mime_str(mime).map_err(|e| {
                            Error::invalid_payload(name.clone(), format!("invalid MIME type: {e}"))
                        })?;
                    }
                    form = form.part(name.clone(), part);
                }
                req.multipart(form)
            }
        };

        if self.config.enable_tracing {
            debug!(
                method = ?request.method(),
                endpoint = %request.endpoint(),
                multipart = request.is_multipart(),
                "Sending request"
            );
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        let body = response.bytes().await?;
        Ok(RawResponse::new(status, body))
    }
}
