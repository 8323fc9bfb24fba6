//! Domain error types
//!
//! This module defines the error hierarchy for Herald. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Herald error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Relational source database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Analytical store (warehouse) errors
    #[error("Warehouse error: {0}")]
    Warehouse(#[from] WarehouseError),

    /// Email delivery errors
    #[error("Email error: {0}")]
    Email(String),

    /// Report assembly errors
    #[error("Report error: {0}")]
    Report(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Analytical-store specific errors
///
/// Errors that occur when talking to the warehouse query service.
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Failed to reach the warehouse endpoint
    #[error("Failed to connect to warehouse: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Response could not be parsed
    #[error("Invalid response from warehouse: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for HeraldError {
    fn from(err: std::io::Error) -> Self {
        HeraldError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for HeraldError {
    fn from(err: serde_json::Error) -> Self {
        HeraldError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HeraldError {
    fn from(err: toml::de::Error) -> Self {
        HeraldError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv writer errors (spreadsheet attachments)
impl From<csv::Error> for HeraldError {
    fn from(err: csv::Error) -> Self {
        HeraldError::Report(format!("CSV write error: {err}"))
    }
}
