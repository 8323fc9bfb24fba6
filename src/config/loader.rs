//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HeraldConfig;
use crate::config::secret_string;
use crate::domain::errors::HeraldError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into HeraldConfig
/// 4. Applies environment variable overrides (HERALD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<HeraldConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HeraldError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HeraldError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: HeraldConfig = toml::from_str(&contents)
        .map_err(|e| HeraldError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        HeraldError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HeraldError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the HERALD_* prefix
///
/// Environment variables follow the pattern: HERALD_<SECTION>_<KEY>
/// For example: HERALD_EMAIL_RELAY_URL, HERALD_WAREHOUSE_BASE_URL
fn apply_env_overrides(config: &mut HeraldConfig) {
    // Report overrides
    if let Ok(val) = std::env::var("HERALD_REPORT_ID") {
        if let Ok(id) = val.parse() {
            config.report.id = id;
        }
    }
    if let Ok(val) = std::env::var("HERALD_REPORT_SUBJECT_PREFIX") {
        config.report.subject_prefix = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("HERALD_SOURCES_PROD_CONNECTION_STRING") {
        config.sources.prod.connection_string = secret_string(val);
    }
    if let Ok(val) = std::env::var("HERALD_SOURCES_STAGE_CONNECTION_STRING") {
        config.sources.stage.connection_string = secret_string(val);
    }

    // Warehouse overrides
    if let Ok(val) = std::env::var("HERALD_WAREHOUSE_BASE_URL") {
        config.warehouse.base_url = val;
    }
    if let Ok(val) = std::env::var("HERALD_WAREHOUSE_DATASET") {
        config.warehouse.dataset = val;
    }
    if let Ok(val) = std::env::var("HERALD_WAREHOUSE_TOKEN") {
        config.warehouse.token = Some(secret_string(val));
    }

    // Output overrides
    if let Ok(val) = std::env::var("HERALD_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("HERALD_OUTPUT_ATTACHMENTS") {
        config.output.attachments = val.parse().unwrap_or(true);
    }

    // Email overrides
    if let Ok(val) = std::env::var("HERALD_EMAIL_RELAY_URL") {
        config.email.relay_url = val;
    }
    if let Ok(val) = std::env::var("HERALD_EMAIL_SENDER") {
        config.email.sender = val;
    }
    if let Ok(val) = std::env::var("HERALD_EMAIL_SHARED_MAILBOX") {
        config.email.shared_mailbox = Some(val);
    }
    if let Ok(val) = std::env::var("HERALD_EMAIL_FORCE_FALLBACK_RECIPIENTS") {
        config.email.force_fallback_recipients = val.parse().unwrap_or(false);
    }

    // Notification overrides
    if let Ok(val) = std::env::var("HERALD_NOTIFICATIONS_TEAMS_WEBHOOK_URL") {
        config.notifications.teams_webhook_url = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HERALD_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("HERALD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HERALD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
