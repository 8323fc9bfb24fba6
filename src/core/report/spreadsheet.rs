//! Spreadsheet attachment generation
//!
//! Writes one CSV per non-empty result set into the output directory, named
//! `{label}_{YYYY-MM-DD}.csv`.

use crate::domain::{QueryTable, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a table as a CSV spreadsheet file.
///
/// The output directory is created if absent. Returns the path of the
/// generated file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_csv(table: &QueryTable, label: &str, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let file_name = format!("{}_{}.csv", label, Local::now().format("%Y-%m-%d"));
    let path = output_dir.join(file_name);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let record: Vec<String> = row.iter().map(QueryTable::cell_text).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = table.row_count(), "Wrote spreadsheet attachment");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_table() -> QueryTable {
        QueryTable::new(
            vec!["payee".to_string(), "amount".to_string()],
            vec![
                vec![json!("Acme Corp"), json!(120.5)],
                vec![json!("Globex"), json!(Option::<String>::None)],
            ],
        )
    }

    #[test]
    fn test_write_csv_names_by_convention() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&sample_table(), "PROD", dir.path()).unwrap();

        let expected = format!("PROD_{}.csv", Local::now().format("%Y-%m-%d"));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected);
    }

    #[test]
    fn test_write_csv_contents() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&sample_table(), "PROD", dir.path()).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("payee,amount"));
        assert_eq!(lines.next(), Some("Acme Corp,120.5"));
        assert_eq!(lines.next(), Some("Globex,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_csv_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("reports").join("daily");
        let path = write_csv(&sample_table(), "STAGE", &nested).unwrap();
        assert!(path.exists());
    }
}
