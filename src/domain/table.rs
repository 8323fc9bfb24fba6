//! Tabular query results
//!
//! Every data-bearing collaborator (relational sources, warehouse) materializes
//! its rows into a [`QueryTable`] so the report layer never sees driver types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An in-memory, ordered tabular result set.
///
/// Rows are positional; `columns[i]` names the value at index `i` of each row.
/// A table may be empty (zero rows) while still carrying column names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryTable {
    /// Column names, in result order
    pub columns: Vec<String>,

    /// Row values, in result order; each row is positional against `columns`
    pub rows: Vec<Vec<Value>>,
}

impl QueryTable {
    /// Create a table from columns and rows
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Create an empty table with the given column names
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The value at (row, column-name), if both exist
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// All values of a named column, in row order
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }

    /// Render a cell value as display text.
    ///
    /// Strings render without quotes, null renders as an empty string, and
    /// everything else uses its JSON representation.
    pub fn cell_text(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table() -> QueryTable {
        QueryTable::new(
            vec!["payee".to_string(), "amount".to_string()],
            vec![
                vec![json!("Acme Corp"), json!(120.5)],
                vec![json!("Globex"), json!(88)],
            ],
        )
    }

    #[test]
    fn test_empty_table() {
        let table = QueryTable::empty(vec!["a".to_string()]);
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns.len(), 1);
    }

    #[test]
    fn test_row_count() {
        assert_eq!(sample_table().row_count(), 2);
        assert!(!sample_table().is_empty());
    }

    #[test]
    fn test_column_index() {
        let table = sample_table();
        assert_eq!(table.column_index("payee"), Some(0));
        assert_eq!(table.column_index("amount"), Some(1));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    fn test_cell_lookup() {
        let table = sample_table();
        assert_eq!(table.cell(0, "payee"), Some(&json!("Acme Corp")));
        assert_eq!(table.cell(1, "amount"), Some(&json!(88)));
        assert_eq!(table.cell(2, "payee"), None);
        assert_eq!(table.cell(0, "missing"), None);
    }

    #[test]
    fn test_column_values_preserves_order() {
        let table = sample_table();
        let values = table.column_values("payee").unwrap();
        assert_eq!(values, vec![&json!("Acme Corp"), &json!("Globex")]);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(QueryTable::cell_text(&json!("plain")), "plain");
        assert_eq!(QueryTable::cell_text(&Value::Null), "");
        assert_eq!(QueryTable::cell_text(&json!(42)), "42");
        assert_eq!(QueryTable::cell_text(&json!(true)), "true");
    }
}
