use std::time::Duration;

use anyhow::{Context, Result};
use pastegate_core::models::WebhookPayload;

/// Best-effort JSON webhook sender.
///
/// Disabled when no URL is configured. Delivery runs on a spawned task; failures
/// are logged and never reach the caller.
#[derive(Clone, Debug)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for webhooks")?;

        if url.is_none() {
            tracing::info!("WEBHOOK_URL not set, webhook notifications disabled");
        }

        Ok(Self { client, url })
    }

    /// Notifier that never sends anything.
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            url: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Fire-and-forget delivery.
    pub fn notify(&self, payload: WebhookPayload) {
        if !self.is_enabled() {
            return;
        }

        let notifier = self.clone();
        tokio::spawn(async move {
            let event = payload.event;
            if let Err(e) = notifier.deliver(&payload).await {
                tracing::warn!(event = %event, error = %e, "Webhook delivery failed");
            }
        });
    }

    /// POST the payload and wait for the response. Non-2xx is an error.
    pub async fn deliver(&self, payload: &WebhookPayload) -> Result<()> {
        let Some(url) = self.url.as_deref() else {
            return Ok(());
        };

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .context("Webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Webhook endpoint returned {}", status);
        }

        tracing::debug!(
            event = %payload.event,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Webhook delivered"
        );
        Ok(())
    }
}
