//! Mail delivery adapter
//!
//! The report is delivered through an external mail-relay collaborator.
//! [`Mailer`] is the seam the runner sees; [`RelayMailer`] posts the message
//! to the relay's HTTP endpoint.

pub mod client;

use crate::domain::{EmailMessage, Result};
use async_trait::async_trait;

pub use client::RelayMailer;

/// Outbound mail interface
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message.
    ///
    /// # Errors
    ///
    /// Returns an error if the message is rejected or the relay is
    /// unreachable. Send failures are fatal for the run.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}
