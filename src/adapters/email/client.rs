//! Mail-relay HTTP client

use crate::adapters::email::Mailer;
use crate::config::EmailConfig;
use crate::domain::{EmailMessage, HeraldError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::Duration;

/// Wire format of one relay submission
#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html_body: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<RelayAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct RelayAttachment<'a> {
    name: &'a str,
    content_type: &'a str,
    /// File bytes, base64-encoded
    content: String,
}

/// Mailer that posts messages to a mail-relay HTTP endpoint
pub struct RelayMailer {
    relay_url: String,
    client: Client,
}

impl RelayMailer {
    /// Create a mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HeraldError::Email(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            relay_url: config.relay_url.clone(),
            client,
        })
    }

    fn payload<'a>(message: &'a EmailMessage) -> RelayPayload<'a> {
        RelayPayload {
            from: &message.sender,
            to: &message.recipients,
            subject: &message.subject,
            html_body: &message.html_body,
            attachments: message
                .attachments
                .iter()
                .map(|a| RelayAttachment {
                    name: &a.name,
                    content_type: &a.content_type,
                    content: general_purpose::STANDARD.encode(&a.data),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        tracing::info!(
            subject = %message.subject,
            recipients = message.recipients.len(),
            attachments = message.attachments.len(),
            "Sending report email"
        );

        let response = self
            .client
            .post(&self.relay_url)
            .json(&Self::payload(message))
            .send()
            .await
            .map_err(|e| HeraldError::Email(format!("Failed to reach mail relay: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HeraldError::Email(format!(
                "Mail relay rejected message with status {status}: {body}"
            )));
        }

        tracing::info!("Report email accepted by relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Attachment;

    fn message_with_attachment() -> EmailMessage {
        EmailMessage::new(
            "herald@example.com",
            vec!["ops@example.com".to_string()],
            "Daily Report 08-27-2026",
            "<p>body</p>",
        )
        .with_attachment(Attachment {
            name: "PROD_2026-08-27.csv".to_string(),
            content_type: "text/csv".to_string(),
            data: b"a,b\n1,2\n".to_vec(),
        })
    }

    #[test]
    fn test_payload_encodes_attachments() {
        let message = message_with_attachment();
        let payload = RelayMailer::payload(&message);
        assert_eq!(payload.attachments.len(), 1);
        assert_eq!(
            payload.attachments[0].content,
            general_purpose::STANDARD.encode(b"a,b\n1,2\n")
        );
    }

    #[test]
    fn test_payload_omits_empty_attachments() {
        let message = EmailMessage::new(
            "herald@example.com",
            vec!["ops@example.com".to_string()],
            "subject",
            "<p></p>",
        );
        let json = serde_json::to_value(RelayMailer::payload(&message)).unwrap();
        assert!(json.get("attachments").is_none());
    }
}
