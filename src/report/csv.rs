//! Comma-separated export.

use super::ReportTable;

/// Quotes a field when it contains a comma, quote, CR or LF. Embedded
/// quotes are doubled.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn push_line<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a String>) {
    let line: Vec<String> = fields.into_iter().map(|f| csv_field(f)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Renders a report as CSV: the raw column names, then one line per row.
///
/// The header line is written even when there are no rows.
///
/// # Example
///
/// ```
/// use esi_engine::report::{ReportTable, render_csv};
///
/// let mut table = ReportTable::new("ESI Report", ["department_name", "employee_count"]);
/// table.push_row(["Sales, North", "4"]);
/// assert_eq!(render_csv(&table), "department_name,employee_count\n\"Sales, North\",4\n");
/// ```
pub fn render_csv(table: &ReportTable) -> String {
    let mut out = String::new();
    push_line(&mut out, table.columns());
    for row in table.rows() {
        push_line(&mut out, row.values());
    }
    out
}
