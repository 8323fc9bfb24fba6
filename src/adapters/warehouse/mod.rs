//! Analytical store (warehouse) adapter
//!
//! The business-day gate, recipient lookup, and run log all go through the
//! [`Warehouse`] trait; [`WarehouseClient`] is the REST implementation.

pub mod client;
pub mod models;

use crate::domain::{QueryTable, Result};
use async_trait::async_trait;
use uuid::Uuid;

pub use client::WarehouseClient;
pub use models::{QueryRequest, QueryResponse, RunLogEntry};

/// "Run query, get rows" interface over the analytical store
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Execute a query and materialize all rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be executed or the response
    /// cannot be parsed.
    async fn run_query(&self, sql: &str) -> Result<QueryTable>;

    /// Append a completion entry to the run log.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    async fn record_run(&self, report_id: u32, run_id: Uuid) -> Result<()>;
}
