//! Warehouse query-service client
//!
//! REST client for the analytical store: "run query, get rows" plus the
//! append-only run log. The store itself is an opaque collaborator; this
//! adapter only shapes requests and maps failures onto domain errors.

use crate::adapters::warehouse::models::{QueryRequest, QueryResponse, RunLogEntry};
use crate::adapters::warehouse::Warehouse;
use crate::config::WarehouseConfig;
use crate::domain::{HeraldError, QueryTable, Result, WarehouseError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use uuid::Uuid;

/// HTTP client for the warehouse query service
pub struct WarehouseClient {
    base_url: String,
    dataset: String,
    token: Option<String>,
    client: Client,
}

impl WarehouseClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &WarehouseConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                HeraldError::Warehouse(WarehouseError::ConnectionFailed(format!(
                    "Failed to build HTTP client: {e}"
                )))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            dataset: config.dataset.clone(),
            token: config
                .token
                .as_ref()
                .map(|t| t.expose_secret().as_ref().to_string()),
            client,
        })
    }

    fn query_url(&self) -> String {
        format!("{}/datasets/{}/queries", self.base_url, self.dataset)
    }

    fn run_log_url(&self) -> String {
        format!("{}/datasets/{}/run-log", self.base_url, self.dataset)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Map a non-success response onto a domain error
    async fn status_error(response: reqwest::Response) -> WarehouseError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            WarehouseError::ServerError {
                status: status.as_u16(),
                message: body,
            }
        } else if status == StatusCode::REQUEST_TIMEOUT {
            WarehouseError::Timeout(body)
        } else {
            WarehouseError::ClientError {
                status: status.as_u16(),
                message: body,
            }
        }
    }
}

#[async_trait]
impl Warehouse for WarehouseClient {
    async fn run_query(&self, sql: &str) -> Result<QueryTable> {
        tracing::debug!(dataset = %self.dataset, "Submitting warehouse query");

        let request = self
            .apply_auth(self.client.post(self.query_url()))
            .json(&QueryRequest { query: sql });

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                WarehouseError::Timeout(e.to_string())
            } else {
                WarehouseError::ConnectionFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await.into());
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| WarehouseError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into())
    }

    async fn record_run(&self, report_id: u32, run_id: Uuid) -> Result<()> {
        let entry = RunLogEntry::completed(report_id, run_id);

        let response = self
            .apply_auth(self.client.post(self.run_log_url()))
            .json(&entry)
            .send()
            .await
            .map_err(|e| WarehouseError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await.into());
        }

        tracing::info!(report_id, %run_id, "Run log entry recorded");
        Ok(())
    }
}
