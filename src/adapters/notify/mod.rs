//! Failure notifications
//!
//! Short plain-text alerts posted to a Teams-style incoming webhook on
//! specific failure points. Strictly best-effort: a failed alert is logged
//! and swallowed, never surfaced to the run.

use crate::config::NotificationsConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Best-effort alert channel
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post a short plain-text alert. Infallible by contract; delivery
    /// problems are the implementation's concern.
    async fn alert(&self, text: &str);
}

/// Notifier posting to a Teams incoming webhook
pub struct TeamsNotifier {
    webhook_url: String,
    client: Client,
}

impl TeamsNotifier {
    /// Create a notifier for the given webhook URL
    pub fn new(webhook_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            webhook_url: webhook_url.into(),
            client,
        }
    }
}

#[async_trait]
impl Notifier for TeamsNotifier {
    async fn alert(&self, text: &str) {
        let result = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "text": text }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Failure alert posted");
            }
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "Failure alert rejected by webhook"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to post failure alert");
            }
        }
    }
}

/// Notifier used when no webhook is configured
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn alert(&self, _text: &str) {}
}

/// Build the notifier matching the configuration
pub fn from_config(config: &NotificationsConfig) -> Arc<dyn Notifier> {
    match &config.teams_webhook_url {
        Some(url) => Arc::new(TeamsNotifier::new(url.clone())),
        None => Arc::new(NoopNotifier),
    }
}
