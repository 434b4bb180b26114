//! Report export for the ESI contribution engine.
//!
//! A [`ReportTable`] is rendered either as an HTML table served as a
//! spreadsheet ([`render_html`]) or as CSV ([`render_csv`]).

mod csv;
mod export;
mod html;
mod table;

pub use csv::{csv_field, render_csv};
pub use export::{ExportDocument, ExportFormat, export_filename, export_report};
pub use html::{escape_html, render_html, title_case};
pub use table::{ReportTable, ToReportRow};
