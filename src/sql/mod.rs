//! SQL resource loading
//!
//! Queries live in plain `.sql` files referenced by the configuration. This
//! module loads them, normalizes the text, and handles the report-id
//! substitution token carried by the recipient query.

use crate::domain::{HeraldError, Result};
use std::fs;
use std::path::Path;

/// Literal token in the recipient query replaced with the report id
pub const REPORT_ID_TOKEN: &str = "INSERTREPID";

/// A loaded, normalized SQL query
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    text: String,
}

impl QueryTemplate {
    /// Load a query from a file resource.
    ///
    /// The text is trimmed and a single trailing statement terminator (`;`)
    /// is stripped, since the warehouse and source drivers submit bare
    /// statements.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, unreadable, or
    /// empty after normalization.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path).map_err(|e| {
            HeraldError::Configuration(format!(
                "Failed to read SQL resource {}: {}",
                path.display(),
                e
            ))
        })?;

        let text = normalize(&raw);
        if text.is_empty() {
            return Err(HeraldError::Configuration(format!(
                "SQL resource {} is empty",
                path.display()
            )));
        }

        Ok(Self { text })
    }

    /// Replace the report-id token with a concrete id.
    ///
    /// Queries without the token pass through unchanged.
    pub fn with_report_id(self, report_id: u32) -> Self {
        Self {
            text: self.text.replace(REPORT_ID_TOKEN, &report_id.to_string()),
        }
    }

    /// The query text
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Trim whitespace and a trailing statement terminator
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_sql(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_trims_and_strips_terminator() {
        let file = write_sql("  SELECT 1 FROM dual ;\n");
        let query = QueryTemplate::load(file.path()).unwrap();
        assert_eq!(query.text(), "SELECT 1 FROM dual");
    }

    #[test]
    fn test_load_preserves_inner_semicolons() {
        let file = write_sql("SELECT ';' AS lit FROM t;");
        let query = QueryTemplate::load(file.path()).unwrap();
        assert_eq!(query.text(), "SELECT ';' AS lit FROM t");
    }

    #[test]
    fn test_load_missing_file() {
        let result = QueryTemplate::load("nonexistent.sql");
        assert!(matches!(result, Err(HeraldError::Configuration(_))));
    }

    #[test]
    fn test_load_empty_file() {
        let file = write_sql("  ;  ");
        assert!(QueryTemplate::load(file.path()).is_err());
    }

    #[test]
    fn test_report_id_substitution() {
        let file = write_sql("SELECT email FROM dl WHERE rep_id = INSERTREPID");
        let query = QueryTemplate::load(file.path()).unwrap().with_report_id(7);
        assert_eq!(query.text(), "SELECT email FROM dl WHERE rep_id = 7");
    }

    #[test]
    fn test_substitution_without_token_is_noop() {
        let file = write_sql("SELECT 1");
        let query = QueryTemplate::load(file.path()).unwrap().with_report_id(7);
        assert_eq!(query.text(), "SELECT 1");
    }
}
