//! Wire models for the warehouse query service

use crate::domain::QueryTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Response body of a query call
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    /// Column names, in result order
    pub columns: Vec<String>,

    /// Row values, positional against `columns`
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl From<QueryResponse> for QueryTable {
    fn from(response: QueryResponse) -> Self {
        QueryTable::new(response.columns, response.rows)
    }
}

/// Request body of a query call
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    /// Query text
    pub query: &'a str,
}

/// One append-style completion record for the run log
#[derive(Debug, Serialize)]
pub struct RunLogEntry {
    /// Report identifier
    pub report_id: u32,

    /// Unique id of this run
    pub run_id: Uuid,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,

    /// Terminal status, always "completed" for recorded runs
    pub status: String,
}

impl RunLogEntry {
    /// A completion entry stamped with the current time
    pub fn completed(report_id: u32, run_id: Uuid) -> Self {
        Self {
            report_id,
            run_id,
            completed_at: Utc::now(),
            status: "completed".to_string(),
        }
    }
}
