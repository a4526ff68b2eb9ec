//! Delivery — posts the rendered report to the WordPress webhook.
//!
//! One logical delivery per request. Transport errors, timeouts, 429 and 5xx
//! are retried with exponential backoff up to `max_retries`; other non-2xx
//! responses fail immediately. Missing URL or API key fails closed before any
//! network call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{Config, MAX_WEBHOOK_RETRIES};

pub const URL_VAR: &str = "WORDPRESS_API_URL";
pub const API_KEY_VAR: &str = "WORDPRESS_API_KEY";
const API_KEY_HEADER: &str = "X-API-KEY";
/// Ceiling for a single backoff step.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("missing configuration: {0}")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("webhook timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl DeliveryError {
    fn is_transient(&self) -> bool {
        match self {
            DeliveryError::NotConfigured(_) => false,
            DeliveryError::Http(_) | DeliveryError::Timeout { .. } => true,
            DeliveryError::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// Body the WordPress plugin expects.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    wp_user_id: &'a str,
    html_result: &'a str,
}

/// Destination for rendered reports. Carried in `AppState` as `Arc<dyn ReportPublisher>`.
#[async_trait]
pub trait ReportPublisher: Send + Sync {
    async fn publish(&self, caller_id: &str, html: &str) -> Result<(), DeliveryError>;
}

#[derive(Clone)]
pub struct WebhookPublisher {
    client: Client,
    url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    max_retries: u32,
    retry_base: Duration,
}

impl WebhookPublisher {
    pub fn from_config(config: &Config) -> Result<Self, DeliveryError> {
        Ok(Self {
            client: Client::builder().timeout(config.webhook_timeout).build()?,
            url: config.webhook_url.clone(),
            api_key: config.webhook_api_key.clone(),
            timeout: config.webhook_timeout,
            max_retries: config.webhook_max_retries.min(MAX_WEBHOOK_RETRIES),
            retry_base: config.webhook_retry_base,
        })
    }

    async fn attempt(&self, url: &str, api_key: &str, payload: &WebhookPayload<'_>) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!("WordPress accepted the report: {body}");
        Ok(())
    }

    fn classify(&self, err: reqwest::Error) -> DeliveryError {
        if err.is_timeout() {
            DeliveryError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            DeliveryError::Http(err)
        }
    }
}

#[async_trait]
impl ReportPublisher for WebhookPublisher {
    async fn publish(&self, caller_id: &str, html: &str) -> Result<(), DeliveryError> {
        let url = self.url.as_deref().ok_or(DeliveryError::NotConfigured(URL_VAR))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(DeliveryError::NotConfigured(API_KEY_VAR))?;

        let payload = WebhookPayload {
            wp_user_id: caller_id,
            html_result: html,
        };

        let mut attempt = 0;
        loop {
            match self.attempt(url, api_key, &payload).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = backoff_delay(self.retry_base, attempt);
                    attempt += 1;
                    warn!(
                        "Webhook delivery attempt {} failed ({e}), retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!("Webhook delivery for user {caller_id} failed: {e}");
                    return Err(e);
                }
            }
        }
    }
}

/// Exponential backoff: base, 2×base, 4×base, ... capped at `MAX_RETRY_DELAY`.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(MAX_RETRY_DELAY)
}
