//! HTML report rendering
//!
//! Pure functions from tabular results to the email body. Deterministic for
//! the same input; no I/O.

use crate::domain::QueryTable;

/// Inline styling applied ahead of each populated table
const TABLE_STYLE: &str = "\
<style>
    table { border-collapse: collapse; width: 100%; font-family: Arial; }
    th, td { border: 1px solid black; padding: 8px; text-align: left; }
    th { background-color: #f2f2f2; }
</style>
";

/// Fragment body shown when a section has no rows
const NO_DATA: &str = "<p>No data available.</p>";

/// Render one report section.
///
/// An empty table yields only the title and a "no data" notice, never a
/// `<table>` element. A populated table renders one header cell per column
/// and one row per input row, in input order, with cell text HTML-escaped.
pub fn render_section(table: &QueryTable, title: &str) -> String {
    if table.is_empty() {
        return format!("<h3>{}</h3>{NO_DATA}", escape_html(title));
    }

    let mut html = String::from(TABLE_STYLE);
    html.push_str(&format!("<h3>{}</h3>", escape_html(title)));
    html.push_str("<table><thead><tr>");
    for column in &table.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for value in row {
            html.push_str(&format!(
                "<td>{}</td>",
                escape_html(&QueryTable::cell_text(value))
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// Compose the full email body from rendered sections
pub fn compose_body(sections: &[String]) -> String {
    let mut body = String::from("<p>Afternoon,</p><br>");
    body.push_str(&sections.join("<br><br>"));
    body.push_str("<br><p>Best,</p>");
    body
}

/// Minimal HTML escaping for text nodes
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn populated_table() -> QueryTable {
        QueryTable::new(
            vec!["payee".to_string(), "status".to_string()],
            vec![
                vec![json!("Acme Corp"), json!("PENDING")],
                vec![json!("Globex"), json!("PENDING")],
                vec![json!("Initech"), json!(Option::<String>::None)],
            ],
        )
    }

    #[test]
    fn test_empty_table_has_no_table_element() {
        let table = QueryTable::empty(vec!["payee".to_string()]);
        let html = render_section(&table, "PROD");
        assert!(html.contains("<h3>PROD</h3>"));
        assert!(html.contains("No data available."));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_populated_table_counts() {
        let html = render_section(&populated_table(), "PROD");
        assert_eq!(html.matches("<th>").count(), 2);
        assert_eq!(html.matches("<tr>").count(), 4); // header + 3 rows
        assert!(!html.contains("No data available."));
    }

    #[test]
    fn test_rows_render_in_input_order() {
        let html = render_section(&populated_table(), "PROD");
        let acme = html.find("Acme Corp").unwrap();
        let globex = html.find("Globex").unwrap();
        let initech = html.find("Initech").unwrap();
        assert!(acme < globex && globex < initech);
    }

    #[test]
    fn test_null_cells_render_empty() {
        let html = render_section(&populated_table(), "PROD");
        assert!(html.contains("<td></td>"));
    }

    #[test]
    fn test_cell_text_is_escaped() {
        let table = QueryTable::new(
            vec!["note".to_string()],
            vec![vec![json!("<script>alert(1)</script>")]],
        );
        let html = render_section(&table, "PROD");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_title_is_escaped() {
        let table = QueryTable::empty(vec![]);
        let html = render_section(&table, "A & B");
        assert!(html.contains("A &amp; B"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let table = populated_table();
        assert_eq!(render_section(&table, "PROD"), render_section(&table, "PROD"));
    }

    #[test]
    fn test_compose_body_wraps_sections() {
        let body = compose_body(&["<h3>PROD</h3>".to_string(), "<h3>STAGE</h3>".to_string()]);
        assert!(body.starts_with("<p>Afternoon,</p><br>"));
        assert!(body.ends_with("<br><p>Best,</p>"));
        assert!(body.contains("<h3>PROD</h3><br><br><h3>STAGE</h3>"));
    }
}
