//! Business-day gate
//!
//! Precondition check that short-circuits the whole run when the calendar
//! query says today is not a working day. Fail-closed: any error on this path
//! is treated as "not a business day", with a best-effort alert so
//! infrastructure problems stay visible.

use crate::adapters::notify::Notifier;
use crate::adapters::warehouse::Warehouse;
use serde_json::Value;

/// Column the calendar query must return
const BUS_DAY_COLUMN: &str = "bus_day";

/// Outcome of the gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Today is a business day; the run proceeds
    BusinessDay,

    /// The run stops here, successfully
    NotBusinessDay {
        /// Why the gate closed (calendar says no, or a documented fallback)
        reason: String,
    },
}

impl GateDecision {
    /// Whether the run should proceed
    pub fn is_open(&self) -> bool {
        matches!(self, GateDecision::BusinessDay)
    }
}

/// Evaluate the business-day gate.
///
/// Expects the query to return exactly one row with a truthy `bus_day`
/// column. Execution errors, empty results, and missing columns all close
/// the gate.
pub async fn evaluate(warehouse: &dyn Warehouse, sql: &str, notifier: &dyn Notifier) -> GateDecision {
    let table = match warehouse.run_query(sql).await {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, "Failed to run business day check");
            notifier
                .alert(&format!("Business day check failed: {e}"))
                .await;
            return GateDecision::NotBusinessDay {
                reason: format!("business day check failed: {e}"),
            };
        }
    };

    match table.cell(0, BUS_DAY_COLUMN) {
        Some(value) if is_truthy(value) => GateDecision::BusinessDay,
        Some(_) => GateDecision::NotBusinessDay {
            reason: "calendar reports a non-business day".to_string(),
        },
        None => {
            tracing::warn!(
                "Business day check query returned no results or missing '{BUS_DAY_COLUMN}' column"
            );
            GateDecision::NotBusinessDay {
                reason: format!("no result or missing '{BUS_DAY_COLUMN}' column"),
            }
        }
    }
}

/// Truthiness of the calendar flag across the value shapes warehouses return
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "t" | "y" | "yes" | "1"
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notify::NoopNotifier;
    use crate::domain::{HeraldError, QueryTable, Result, WarehouseError};
    use async_trait::async_trait;
    use serde_json::json;
    use test_case::test_case;
    use uuid::Uuid;

    struct StubWarehouse {
        table: Option<QueryTable>,
    }

    #[async_trait]
    impl Warehouse for StubWarehouse {
        async fn run_query(&self, _sql: &str) -> Result<QueryTable> {
            self.table.clone().ok_or_else(|| {
                HeraldError::Warehouse(WarehouseError::QueryFailed("boom".to_string()))
            })
        }

        async fn record_run(&self, _report_id: u32, _run_id: Uuid) -> Result<()> {
            Ok(())
        }
    }

    fn bus_day_table(value: serde_json::Value) -> QueryTable {
        QueryTable::new(vec!["bus_day".to_string()], vec![vec![value]])
    }

    #[tokio::test]
    async fn test_open_on_truthy_flag() {
        let warehouse = StubWarehouse {
            table: Some(bus_day_table(json!(true))),
        };
        let decision = evaluate(&warehouse, "SELECT 1", &NoopNotifier).await;
        assert!(decision.is_open());
    }

    #[tokio::test]
    async fn test_closed_on_false_flag() {
        let warehouse = StubWarehouse {
            table: Some(bus_day_table(json!(false))),
        };
        let decision = evaluate(&warehouse, "SELECT 1", &NoopNotifier).await;
        assert!(!decision.is_open());
    }

    #[tokio::test]
    async fn test_closed_on_empty_result() {
        let warehouse = StubWarehouse {
            table: Some(QueryTable::empty(vec!["bus_day".to_string()])),
        };
        let decision = evaluate(&warehouse, "SELECT 1", &NoopNotifier).await;
        assert!(!decision.is_open());
    }

    #[tokio::test]
    async fn test_closed_on_missing_column() {
        let warehouse = StubWarehouse {
            table: Some(QueryTable::new(
                vec!["other".to_string()],
                vec![vec![json!(true)]],
            )),
        };
        let decision = evaluate(&warehouse, "SELECT 1", &NoopNotifier).await;
        assert!(!decision.is_open());
    }

    #[tokio::test]
    async fn test_closed_on_query_error() {
        let warehouse = StubWarehouse { table: None };
        let decision = evaluate(&warehouse, "SELECT 1", &NoopNotifier).await;
        match decision {
            GateDecision::NotBusinessDay { reason } => {
                assert!(reason.contains("business day check failed"));
            }
            GateDecision::BusinessDay => panic!("gate should be closed on error"),
        }
    }

    #[test_case(json!(true), true; "bool true")]
    #[test_case(json!(false), false; "bool false")]
    #[test_case(json!(1), true; "number one")]
    #[test_case(json!(0), false; "number zero")]
    #[test_case(json!("Y"), true; "letter y")]
    #[test_case(json!("true"), true; "string true")]
    #[test_case(json!("no"), false; "string no")]
    #[test_case(Value::Null, false; "null")]
    fn test_is_truthy_shapes(value: Value, expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }
}
