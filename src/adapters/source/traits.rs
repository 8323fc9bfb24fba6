//! Source database abstraction traits
//!
//! These traits are the seam between the report runner and the concrete
//! PostgreSQL adapter, so tests can substitute in-memory doubles.

use crate::config::SourceConfig;
use crate::domain::{QueryTable, Result};
use async_trait::async_trait;

/// A live session against one relational source.
///
/// The runner owns at most two of these per run and guarantees `close` is
/// called exactly once on every exit path after `connect` succeeded.
#[async_trait]
pub trait SourceDatabase: Send + Sync {
    /// Human-readable source label ("prod", "stage") for logging
    fn name(&self) -> &str;

    /// Execute a query and materialize all rows.
    ///
    /// # Errors
    ///
    /// Propagates execution errors to the caller after logging; no retry.
    async fn fetch(&self, sql: &str) -> Result<QueryTable>;

    /// Release the underlying session
    async fn close(&self);
}

/// Factory for source sessions
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Open a session for the given source.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    async fn connect(&self, name: &str, config: &SourceConfig) -> Result<Box<dyn SourceDatabase>>;
}
