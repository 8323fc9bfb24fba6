//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates internally
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(1);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Report id: {}", config.report.id);
        println!("  Subject prefix: {}", config.report.subject_prefix);
        println!("  Warehouse: {}", config.warehouse.base_url);
        println!("  Dataset: {}", config.warehouse.dataset);
        println!("  Output directory: {}", config.output.directory);
        println!("  Attachments: {}", config.output.attachments);
        println!("  Sender: {}", config.email.sender_identity());
        println!("  Fallback recipients: {:?}", config.email.fallback_recipients);
        println!(
            "  Teams alerts: {}",
            if config.notifications.teams_webhook_url.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}
