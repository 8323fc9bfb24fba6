//! Configuration schema types
//!
//! This module defines the configuration structure for Herald. One
//! parameterized configuration covers both deployment variants of the report
//! job: source locators, SQL resource paths, output directory, recipient
//! fallback, attachment generation, and the shared-mailbox sender override.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main Herald configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// Report identity and subject settings
    pub report: ReportConfig,

    /// The two relational source connections
    pub sources: SourcesConfig,

    /// Analytical store used for the business-day gate, recipient lookup,
    /// and the run log
    pub warehouse: WarehouseConfig,

    /// SQL resource file paths
    #[serde(default)]
    pub sql: SqlConfig,

    /// Attachment output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Mail relay settings
    pub email: EmailConfig,

    /// Failure notification settings
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HeraldConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.report.validate()?;
        self.sources.prod.validate("sources.prod")?;
        self.sources.stage.validate("sources.stage")?;
        self.warehouse.validate()?;
        self.sql.validate()?;
        self.output.validate()?;
        self.email.validate()?;
        self.notifications.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Report identity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Numeric report identifier, substituted into the recipient query and
    /// written to the run log
    pub id: u32,

    /// Section-independent report title (used in log context)
    #[serde(default = "default_report_title")]
    pub title: String,

    /// Email subject prefix; the run date is appended at send time
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.subject_prefix.trim().is_empty() {
            return Err("report.subject_prefix cannot be empty".to_string());
        }
        Ok(())
    }
}

/// The two relational source connections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Production source ("PROD" section of the report)
    pub prod: SourceConfig,

    /// Staging source ("STAGE" section of the report)
    pub stage: SourceConfig,
}

/// A single relational source connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// PostgreSQL connection string; credentials come from the environment
    /// via `${VAR}` substitution in the TOML file
    pub connection_string: SecretString,

    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Connection acquisition timeout
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,

    /// Per-statement timeout
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_seconds: u64,
}

impl SourceConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        use secrecy::ExposeSecret;

        let conn = self.connection_string.expose_secret();
        if conn.is_empty() {
            return Err(format!("{section}.connection_string cannot be empty"));
        }
        if !conn.as_ref().starts_with("postgres://") && !conn.as_ref().starts_with("postgresql://")
        {
            return Err(format!(
                "{section}.connection_string must start with postgres:// or postgresql://"
            ));
        }
        if self.max_connections == 0 {
            return Err(format!("{section}.max_connections must be greater than 0"));
        }
        Ok(())
    }
}

/// Analytical store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Base URL of the warehouse query service
    pub base_url: String,

    /// Dataset the report queries and the run log live in
    pub dataset: String,

    /// Bearer token for the query service (optional)
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Request timeout
    #[serde(default = "default_warehouse_timeout")]
    pub timeout_seconds: u64,
}

impl WarehouseConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "warehouse.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if self.dataset.trim().is_empty() {
            return Err("warehouse.dataset cannot be empty".to_string());
        }
        Ok(())
    }
}

/// SQL resource file paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlConfig {
    /// Query for the production source
    #[serde(default = "default_sql_prod")]
    pub prod: String,

    /// Query for the staging source
    #[serde(default = "default_sql_stage")]
    pub stage: String,

    /// Recipient lookup query (contains the report-id token)
    #[serde(default = "default_sql_recipients")]
    pub recipients: String,

    /// Business-day calendar query
    #[serde(default = "default_sql_business_day")]
    pub business_day: String,
}

impl SqlConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, path) in [
            ("sql.prod", &self.prod),
            ("sql.stage", &self.stage),
            ("sql.recipients", &self.recipients),
            ("sql.business_day", &self.business_day),
        ] {
            if path.trim().is_empty() {
                return Err(format!("{key} cannot be empty"));
            }
        }
        Ok(())
    }
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            prod: default_sql_prod(),
            stage: default_sql_stage(),
            recipients: default_sql_recipients(),
            business_day: default_sql_business_day(),
        }
    }
}

/// Attachment output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for generated spreadsheet files (created if absent)
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Whether to generate spreadsheet attachments for non-empty results
    #[serde(default = "default_true")]
    pub attachments: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            attachments: true,
        }
    }
}

/// Mail relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Mail relay endpoint the message is posted to
    pub relay_url: String,

    /// Default sender identity
    pub sender: String,

    /// Shared-mailbox sender override (richer deployment variant)
    #[serde(default)]
    pub shared_mailbox: Option<String>,

    /// Fallback recipients used when dynamic lookup fails
    #[serde(default = "default_fallback_recipients")]
    pub fallback_recipients: Vec<String>,

    /// Send to the fallback list even when recipient lookup succeeds.
    ///
    /// Matches one deployment variant; the resolved list is still fetched
    /// and logged.
    #[serde(default)]
    pub force_fallback_recipients: bool,

    /// Request timeout for the relay call
    #[serde(default = "default_email_timeout")]
    pub timeout_seconds: u64,
}

impl EmailConfig {
    /// The sender identity for outbound mail, honoring the shared-mailbox
    /// override when configured
    pub fn sender_identity(&self) -> &str {
        self.shared_mailbox.as_deref().unwrap_or(&self.sender)
    }

    fn validate(&self) -> Result<(), String> {
        if !self.relay_url.starts_with("http://") && !self.relay_url.starts_with("https://") {
            return Err(format!(
                "email.relay_url must start with http:// or https://, got '{}'",
                self.relay_url
            ));
        }
        if !self.sender.contains('@') {
            return Err(format!("email.sender is not an address: '{}'", self.sender));
        }
        if let Some(mailbox) = &self.shared_mailbox {
            if !mailbox.contains('@') {
                return Err(format!("email.shared_mailbox is not an address: '{mailbox}'"));
            }
        }
        if self.fallback_recipients.is_empty() {
            return Err("email.fallback_recipients cannot be empty".to_string());
        }
        for addr in &self.fallback_recipients {
            if !addr.contains('@') {
                return Err(format!("email.fallback_recipients entry is not an address: '{addr}'"));
            }
        }
        Ok(())
    }
}

/// Failure notification settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Teams incoming-webhook URL; alerts are skipped when unset
    #[serde(default)]
    pub teams_webhook_url: Option<String>,
}

impl NotificationsConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.teams_webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!(
                    "notifications.teams_webhook_url must start with http:// or https://, got '{url}'"
                ));
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log file directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be 'daily' or 'hourly'",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn default_report_title() -> String {
    "Payees Pending Approval".to_string()
}

fn default_subject_prefix() -> String {
    "Payees Pending Approval - Daily Report".to_string()
}

fn default_max_connections() -> usize {
    4
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_statement_timeout() -> u64 {
    60
}

fn default_warehouse_timeout() -> u64 {
    60
}

fn default_sql_prod() -> String {
    "sql/payees_prod.sql".to_string()
}

fn default_sql_stage() -> String {
    "sql/payees_stage.sql".to_string()
}

fn default_sql_recipients() -> String {
    "sql/report_recipients.sql".to_string()
}

fn default_sql_business_day() -> String {
    "sql/business_day.sql".to_string()
}

fn default_output_directory() -> String {
    "output".to_string()
}

fn default_fallback_recipients() -> Vec<String> {
    vec!["mattoh@cotality.com".to_string()]
}

fn default_email_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> HeraldConfig {
        HeraldConfig {
            report: ReportConfig {
                id: 1,
                title: default_report_title(),
                subject_prefix: default_subject_prefix(),
            },
            sources: SourcesConfig {
                prod: SourceConfig {
                    connection_string: secret_string("postgresql://user:pw@prod-db:5432/payees"),
                    max_connections: 4,
                    connection_timeout_seconds: 30,
                    statement_timeout_seconds: 60,
                },
                stage: SourceConfig {
                    connection_string: secret_string("postgresql://user:pw@stage-db:5432/payees"),
                    max_connections: 4,
                    connection_timeout_seconds: 30,
                    statement_timeout_seconds: 60,
                },
            },
            warehouse: WarehouseConfig {
                base_url: "https://warehouse.example.com".to_string(),
                dataset: "wfm_reporting".to_string(),
                token: None,
                timeout_seconds: 60,
            },
            sql: SqlConfig::default(),
            output: OutputConfig::default(),
            email: EmailConfig {
                relay_url: "https://mail-relay.example.com/send".to_string(),
                sender: "herald@example.com".to_string(),
                shared_mailbox: None,
                fallback_recipients: default_fallback_recipients(),
                force_fallback_recipients: false,
                timeout_seconds: 30,
            },
            notifications: NotificationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_bad_connection_string_rejected() {
        let mut config = valid_config();
        config.sources.prod.connection_string = secret_string("oracle://somewhere");
        let err = config.validate().unwrap_err();
        assert!(err.contains("sources.prod.connection_string"));
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let mut config = valid_config();
        config.sources.stage.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_warehouse_url_rejected() {
        let mut config = valid_config();
        config.warehouse.base_url = "warehouse.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_fallback_recipients_rejected() {
        let mut config = valid_config();
        config.email.fallback_recipients.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sender_identity_prefers_shared_mailbox() {
        let mut config = valid_config();
        assert_eq!(config.email.sender_identity(), "herald@example.com");
        config.email.shared_mailbox = Some("wfm-reports@example.com".to_string());
        assert_eq!(config.email.sender_identity(), "wfm-reports@example.com");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_fallback_recipients() {
        assert_eq!(default_fallback_recipients(), vec!["mattoh@cotality.com"]);
    }
}
