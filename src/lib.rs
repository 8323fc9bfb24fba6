//! # Herald - business-day report mailer
//!
//! Herald is a run-once reporting job: it checks whether today is a business
//! day, pulls rows from two relational sources, renders them as styled HTML
//! tables (optionally with CSV spreadsheet attachments), resolves a recipient
//! list from an analytical store, and sends a single email through a
//! mail-relay collaborator. Failures on specific steps post best-effort
//! alerts to a Teams-style webhook.
//!
//! ## Architecture
//!
//! Herald follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (gate, formatting, recipients, orchestration)
//! - [`adapters`] - External integrations (sources, warehouse, mail, alerts)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`sql`] - SQL resource loading
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use herald::adapters::email::RelayMailer;
//! use herald::adapters::notify;
//! use herald::adapters::source::PostgresConnector;
//! use herald::adapters::warehouse::WarehouseClient;
//! use herald::config::load_config;
//! use herald::core::report::ReportRunner;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("herald.toml")?;
//!
//!     let warehouse = Arc::new(WarehouseClient::new(&config.warehouse)?);
//!     let mailer = Arc::new(RelayMailer::new(&config.email)?);
//!     let notifier = notify::from_config(&config.notifications);
//!     let connector = Arc::new(PostgresConnector);
//!
//!     let runner = ReportRunner::new(config, warehouse, connector, mailer, notifier);
//!     let summary = runner.run().await?;
//!
//!     println!("{}", summary.describe());
//!     Ok(())
//! }
//! ```
//!
//! ## Control flow
//!
//! The run is strictly sequential with early exits:
//!
//! 1. Business-day gate (fail-closed; a closed gate is a successful no-op)
//! 2. Fetch from both sources (either failure is fatal)
//! 3. Empty check (both empty is a successful no-op)
//! 4. Build HTML payload and optional attachments
//! 5. Resolve recipients (never fatal; falls back to a configured list)
//! 6. Send (failure is fatal)
//! 7. Record a completion entry in the warehouse run log
//!
//! Source connections are closed exactly once on every exit path.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod sql;
