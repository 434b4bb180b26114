//! HTML table export, opened by spreadsheet applications as a workbook.

use std::fmt::Write;

use super::ReportTable;

/// Escapes the five HTML-significant characters.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Turns a column name into a header label: `employee_count` becomes
/// `Employee Count`.
pub fn title_case(column: &str) -> String {
    column
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a report as a bordered HTML table.
///
/// The first row holds the title across all columns. Header and data rows
/// follow only when the table has rows.
///
/// # Example
///
/// ```
/// use esi_engine::report::{ReportTable, render_html};
///
/// let table = ReportTable::new("ESI Report", ["emp_code"]);
/// assert_eq!(
///     render_html(&table),
///     "<table border='1'><tr><th colspan='1'><h2>ESI Report</h2></th></tr></table>"
/// );
/// ```
pub fn render_html(table: &ReportTable) -> String {
    let mut html = String::from("<table border='1'>");
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        "<tr><th colspan='{}'><h2>{}</h2></th></tr>",
        table.columns().len(),
        escape_html(table.title())
    );

    if !table.is_empty() {
        html.push_str("<tr>");
        for column in table.columns() {
            let _ = write!(html, "<th>{}</th>", escape_html(&title_case(column)));
        }
        html.push_str("</tr>");

        for row in table.rows() {
            html.push_str("<tr>");
            for cell in row.values() {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
            html.push_str("</tr>");
        }
    }

    html.push_str("</table>");
    html
}
