//! Run command implementation
//!
//! Wires the production collaborators together and executes one report run.
//! Exit code contract: 0 for success and for the benign no-op outcomes
//! (non-business day, no data); 1 for any fatal error.

use crate::adapters::email::RelayMailer;
use crate::adapters::notify;
use crate::adapters::source::PostgresConnector;
use crate::adapters::warehouse::WarehouseClient;
use crate::config::load_config;
use crate::core::report::ReportRunner;
use clap::Args;
use std::sync::Arc;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the report id used for recipient lookup and run logging
    #[arg(long)]
    pub report_id: Option<u32>,

    /// Disable spreadsheet attachments for this run
    #[arg(long)]
    pub no_attachments: bool,

    /// Send only to the configured fallback recipients
    #[arg(long)]
    pub fallback_recipients_only: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(1);
            }
        };

        // Apply CLI overrides
        if let Some(report_id) = self.report_id {
            tracing::info!(report_id, "Overriding report id from CLI");
            config.report.id = report_id;
        }
        if self.no_attachments {
            tracing::info!("Disabling attachments from CLI");
            config.output.attachments = false;
        }
        if self.fallback_recipients_only {
            tracing::info!("Forcing fallback recipients from CLI");
            config.email.force_fallback_recipients = true;
        }

        // Build collaborators
        let warehouse = match WarehouseClient::new(&config.warehouse) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create warehouse client");
                eprintln!("❌ {e}");
                return Ok(1);
            }
        };
        let mailer = match RelayMailer::new(&config.email) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create mail relay client");
                eprintln!("❌ {e}");
                return Ok(1);
            }
        };
        let notifier = notify::from_config(&config.notifications);
        let connector = Arc::new(PostgresConnector);

        let runner = ReportRunner::new(config, warehouse, connector, mailer, notifier);

        match runner.run().await {
            Ok(summary) => {
                println!("✅ {}", summary.describe());
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Report run failed: {e}");
                Ok(1)
            }
        }
    }
}
