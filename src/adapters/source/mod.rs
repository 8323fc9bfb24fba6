//! Relational source adapters
//!
//! The two primary data fetches run against independent PostgreSQL sessions.
//! The runner talks to [`SourceDatabase`]/[`SourceConnector`] trait objects;
//! [`PostgresSource`] is the production implementation.

pub mod client;
pub mod traits;

pub use client::{PostgresConnector, PostgresSource};
pub use traits::{SourceConnector, SourceDatabase};
