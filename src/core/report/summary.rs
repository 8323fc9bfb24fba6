//! Run summary and outcome reporting

use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Terminal outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The business-day gate closed; nothing was fetched or sent
    NotBusinessDay,

    /// Both sources returned empty results; no email was sent
    NoData,

    /// The report was sent
    Sent {
        /// Addresses the email went to
        recipients: Vec<String>,
        /// Generated spreadsheet files attached to the email
        attachments: Vec<PathBuf>,
    },
}

/// Summary of one report run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Unique id of this run
    pub run_id: Uuid,

    /// How the run ended
    pub outcome: RunOutcome,

    /// Rows fetched from the production source (0 when the gate closed)
    pub prod_rows: usize,

    /// Rows fetched from the staging source (0 when the gate closed)
    pub stage_rows: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// One-line human description for the console
    pub fn describe(&self) -> String {
        match &self.outcome {
            RunOutcome::NotBusinessDay => "Today is not a business day; nothing to do".to_string(),
            RunOutcome::NoData => "No data to send".to_string(),
            RunOutcome::Sent {
                recipients,
                attachments,
            } => format!(
                "Report sent to {} recipient(s) with {} attachment(s)",
                recipients.len(),
                attachments.len()
            ),
        }
    }
}
