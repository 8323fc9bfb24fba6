//! Email message and attachment models
//!
//! Generic message types handed to the mail-relay adapter. The idea is to keep
//! the report layer on these types and let the adapter translate them into its
//! wire format.

use crate::domain::{HeraldError, Result};
use std::path::Path;

/// An outbound email message
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Sender identity (may be a shared-mailbox override)
    pub sender: String,

    /// Recipient addresses, in order
    pub recipients: Vec<String>,

    /// Subject line
    pub subject: String,

    /// HTML body
    pub html_body: String,

    /// File attachments
    pub attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Create a message with no attachments
    pub fn new(
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipients,
            subject: subject.into(),
            html_body: html_body.into(),
            attachments: Vec::new(),
        }
    }

    /// Add an attachment
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A file attachment
#[derive(Debug, Clone)]
pub struct Attachment {
    /// File name shown to the recipient
    pub name: String,

    /// MIME content type
    pub content_type: String,

    /// Raw file bytes
    pub data: Vec<u8>,
}

impl Attachment {
    /// Read an attachment from a file path.
    ///
    /// The attachment name is the file name component; the content type is
    /// derived from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or has no file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                HeraldError::Report(format!("Attachment path has no file name: {}", path.display()))
            })?
            .to_string();

        let data = std::fs::read(path).map_err(|e| {
            HeraldError::Io(format!("Failed to read attachment {}: {}", path.display(), e))
        })?;

        let content_type = content_type_for(&name).to_string();

        Ok(Self {
            name,
            content_type,
            data,
        })
    }

    /// Attachment size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// MIME content type by file extension
fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("csv") => "text/csv",
        Some("html") | Some("htm") => "text/html",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
