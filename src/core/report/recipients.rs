//! Recipient resolution
//!
//! Looks up the distribution list for this report in the warehouse. Never
//! allowed to abort the run: every failure substitutes the configured
//! fallback list as an explicit, typed branch.

use crate::adapters::notify::Notifier;
use crate::adapters::warehouse::Warehouse;
use crate::domain::QueryTable;

/// Column the recipient query must return
const ADDRESS_COLUMN: &str = "Email_Addr";

/// Resolved recipient list, with the fallback path made explicit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipients {
    /// Addresses resolved from the warehouse
    Resolved(Vec<String>),

    /// Lookup failed; the documented fallback list is in effect
    Fallback {
        /// The configured fallback addresses
        addresses: Vec<String>,
        /// Why resolution fell back
        reason: String,
    },
}

impl Recipients {
    /// The addresses to send to
    pub fn addresses(&self) -> &[String] {
        match self {
            Recipients::Resolved(addresses) => addresses,
            Recipients::Fallback { addresses, .. } => addresses,
        }
    }

    /// Whether the fallback branch was taken
    pub fn is_fallback(&self) -> bool {
        matches!(self, Recipients::Fallback { .. })
    }
}

/// Resolve the recipient list for the report.
///
/// Requires a non-empty result with an `Email_Addr` column; any failure
/// (query error, empty result, missing column, no usable addresses) logs a
/// warning, posts a best-effort alert, and yields the fallback list.
pub async fn resolve(
    warehouse: &dyn Warehouse,
    sql: &str,
    fallback: &[String],
    notifier: &dyn Notifier,
) -> Recipients {
    let fall_back = |reason: String| Recipients::Fallback {
        addresses: fallback.to_vec(),
        reason,
    };

    let table = match warehouse.run_query(sql).await {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to configured recipients due to error");
            notifier
                .alert(&format!("Recipient lookup failed: {e}"))
                .await;
            return fall_back(format!("recipient query failed: {e}"));
        }
    };

    let Some(values) = table.column_values(ADDRESS_COLUMN) else {
        tracing::warn!("Recipient query result missing '{ADDRESS_COLUMN}' column, falling back");
        return fall_back(format!("missing '{ADDRESS_COLUMN}' column"));
    };

    let addresses: Vec<String> = values
        .into_iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect();

    if addresses.is_empty() {
        tracing::warn!("No recipient emails found, falling back");
        return fall_back("no recipient emails found".to_string());
    }

    Recipients::Resolved(addresses)
}
