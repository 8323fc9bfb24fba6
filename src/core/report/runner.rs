//! Report runner - main orchestrator for one report run
//!
//! Sequences the whole job: business-day gate, the two source fetches, HTML
//! assembly, attachment generation, recipient resolution, send, and the run
//! log. Collaborators are injected as trait objects so every step can be
//! exercised with test doubles.

use crate::adapters::email::Mailer;
use crate::adapters::notify::Notifier;
use crate::adapters::source::{SourceConnector, SourceDatabase};
use crate::adapters::warehouse::Warehouse;
use crate::config::{HeraldConfig, SourceConfig};
use crate::core::report::gate::{self, GateDecision};
use crate::core::report::recipients;
use crate::core::report::summary::{RunOutcome, RunSummary};
use crate::core::report::{format, spreadsheet};
use crate::domain::{Attachment, EmailMessage, QueryTable, Result};
use crate::sql::QueryTemplate;
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Report section titles, paired with their source configuration keys
const PROD_TITLE: &str = "PROD";
const STAGE_TITLE: &str = "STAGE";

/// Orchestrates one report run
pub struct ReportRunner {
    config: HeraldConfig,
    warehouse: Arc<dyn Warehouse>,
    connector: Arc<dyn SourceConnector>,
    mailer: Arc<dyn Mailer>,
    notifier: Arc<dyn Notifier>,
}

impl ReportRunner {
    /// Create a runner over the given collaborators
    pub fn new(
        config: HeraldConfig,
        warehouse: Arc<dyn Warehouse>,
        connector: Arc<dyn SourceConnector>,
        mailer: Arc<dyn Mailer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            warehouse,
            connector,
            mailer,
            notifier,
        }
    }

    /// Execute the run.
    ///
    /// Returns a summary on success (including the benign no-op outcomes);
    /// a fatal error is logged, alerted, and propagated for the caller to
    /// turn into a non-zero exit. Source connections opened along the way
    /// are closed exactly once on every path.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let run_id = Uuid::new_v4();
        let report_id = self.config.report.id;

        tracing::info!(report_id, %run_id, title = %self.config.report.title, "Report run started");

        let gate_sql = match QueryTemplate::load(&self.config.sql.business_day) {
            Ok(sql) => sql,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load business day query");
                self.alert_failure(&e.to_string()).await;
                return Err(e);
            }
        };

        let decision =
            gate::evaluate(self.warehouse.as_ref(), gate_sql.text(), self.notifier.as_ref()).await;
        if let GateDecision::NotBusinessDay { reason } = decision {
            tracing::info!(%reason, "Today is NOT a business day. Exiting.");
            return Ok(RunSummary {
                run_id,
                outcome: RunOutcome::NotBusinessDay,
                prod_rows: 0,
                stage_rows: 0,
                duration: started.elapsed(),
            });
        }

        // Connections land here as soon as they open so the cleanup below
        // covers every exit path, fatal included.
        let mut open: Vec<Box<dyn SourceDatabase>> = Vec::new();
        let result = self.fetch_and_send(run_id, &mut open).await;

        for connection in open.drain(..) {
            connection.close().await;
        }

        match result {
            Ok((outcome, prod_rows, stage_rows)) => {
                let summary = RunSummary {
                    run_id,
                    outcome,
                    prod_rows,
                    stage_rows,
                    duration: started.elapsed(),
                };
                tracing::info!(
                    report_id,
                    %run_id,
                    duration_ms = summary.duration.as_millis() as u64,
                    "Report run completed successfully"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!(report_id, %run_id, error = %e, "Report run failed");
                self.alert_failure(&e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Everything after the gate: fetch, format, resolve, send, record
    async fn fetch_and_send(
        &self,
        run_id: Uuid,
        open: &mut Vec<Box<dyn SourceDatabase>>,
    ) -> Result<(RunOutcome, usize, usize)> {
        let prod_sql = QueryTemplate::load(&self.config.sql.prod)?;
        let stage_sql = QueryTemplate::load(&self.config.sql.stage)?;

        let prod = self
            .fetch_source("prod", &self.config.sources.prod, prod_sql.text(), open)
            .await?;
        let stage = self
            .fetch_source("stage", &self.config.sources.stage, stage_sql.text(), open)
            .await?;

        if prod.is_empty() && stage.is_empty() {
            tracing::info!("No data to send.");
            return Ok((RunOutcome::NoData, 0, 0));
        }

        let sections = vec![
            format::render_section(&prod, PROD_TITLE),
            format::render_section(&stage, STAGE_TITLE),
        ];
        let body = format::compose_body(&sections);

        let (attachments, attachment_paths) = self.build_attachments(&prod, &stage)?;

        let recipients_sql =
            QueryTemplate::load(&self.config.sql.recipients)?.with_report_id(self.config.report.id);
        let resolved = recipients::resolve(
            self.warehouse.as_ref(),
            recipients_sql.text(),
            &self.config.email.fallback_recipients,
            self.notifier.as_ref(),
        )
        .await;

        // One deployment variant deliberately mails the fallback list even
        // when resolution succeeds.
        let to = if self.config.email.force_fallback_recipients && !resolved.is_fallback() {
            tracing::info!(
                resolved = ?resolved.addresses(),
                "Recipient lookup succeeded but fallback-only sending is configured"
            );
            self.config.email.fallback_recipients.clone()
        } else {
            resolved.addresses().to_vec()
        };
        tracing::info!(recipients = ?to, fallback = resolved.is_fallback(), "Recipients determined");

        let subject = format!(
            "{} {}",
            self.config.report.subject_prefix,
            Local::now().format("%m-%d-%Y")
        );
        let mut message = EmailMessage::new(
            self.config.email.sender_identity(),
            to.clone(),
            subject,
            body,
        );
        message.attachments = attachments;

        self.mailer.send(&message).await?;

        // The email is the product; a run-log failure is bookkeeping only
        if let Err(e) = self.warehouse.record_run(self.config.report.id, run_id).await {
            tracing::warn!(error = %e, "Failed to record run log entry");
        }

        Ok((
            RunOutcome::Sent {
                recipients: to,
                attachments: attachment_paths,
            },
            prod.row_count(),
            stage.row_count(),
        ))
    }

    /// Open one source and fetch its rows.
    ///
    /// The connection is registered for cleanup before the fetch result is
    /// inspected, so a failed fetch still gets its session closed.
    async fn fetch_source(
        &self,
        name: &str,
        source_config: &SourceConfig,
        sql: &str,
        open: &mut Vec<Box<dyn SourceDatabase>>,
    ) -> Result<QueryTable> {
        let connection = self.connector.connect(name, source_config).await.map_err(|e| {
            tracing::error!(source = name, error = %e, "Failed to open source connection");
            e
        })?;

        let fetched = connection.fetch(sql).await;
        open.push(connection);

        let table = fetched?;
        tracing::info!(source = name, rows = table.row_count(), "Fetched source rows");
        Ok(table)
    }

    /// Generate spreadsheet files for non-empty results, when enabled
    fn build_attachments(
        &self,
        prod: &QueryTable,
        stage: &QueryTable,
    ) -> Result<(Vec<Attachment>, Vec<PathBuf>)> {
        let mut attachments = Vec::new();
        let mut paths = Vec::new();

        if !self.config.output.attachments {
            return Ok((attachments, paths));
        }

        for (table, label) in [(prod, PROD_TITLE), (stage, STAGE_TITLE)] {
            if table.is_empty() {
                continue;
            }
            let path = spreadsheet::write_csv(table, label, &self.config.output.directory)?;
            attachments.push(Attachment::from_path(&path)?);
            paths.push(path);
        }

        Ok((attachments, paths))
    }

    async fn alert_failure(&self, detail: &str) {
        self.notifier
            .alert(&format!("{} run failed: {detail}", self.config.report.title))
            .await;
    }
}
