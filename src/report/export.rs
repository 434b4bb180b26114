//! Export format selection and download naming.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::ReportType;

use super::{ReportTable, render_csv, render_html};

/// File formats a report can be downloaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// HTML table served as a spreadsheet.
    #[default]
    Excel,
    /// Comma-separated values.
    Csv,
}

impl ExportFormat {
    /// Parses a requested format. Anything other than `excel` is CSV.
    ///
    /// ```
    /// use esi_engine::report::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::from_request("excel"), ExportFormat::Excel);
    /// assert_eq!(ExportFormat::from_request("pdf"), ExportFormat::Csv);
    /// ```
    pub fn from_request(value: &str) -> Self {
        if value == "excel" {
            ExportFormat::Excel
        } else {
            ExportFormat::Csv
        }
    }

    /// MIME type sent with the download.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "application/vnd.ms-excel",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// A rendered report ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Download file name, including extension.
    pub filename: String,
    /// MIME type of `body`.
    pub content_type: &'static str,
    /// The rendered document.
    pub body: String,
}

impl ExportDocument {
    /// Value for the `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Builds the base file name of a report download.
///
/// The monthly summary is named after its financial year when one was
/// given; every other report is named after the generation date.
pub fn export_filename(
    report_type: ReportType,
    financial_year: Option<&str>,
    generated_on: NaiveDate,
) -> String {
    match (report_type, financial_year) {
        (ReportType::MonthlySummary, Some(fy)) => format!("esi_{}_{}", report_type, fy),
        _ => format!("esi_{}_{}", report_type, generated_on.format("%Y-%m-%d")),
    }
}

/// Renders a report table in the requested format.
pub fn export_report(
    table: &ReportTable,
    format: ExportFormat,
    base_name: &str,
) -> ExportDocument {
    let body = match format {
        ExportFormat::Excel => render_html(table),
        ExportFormat::Csv => render_csv(table),
    };
    ExportDocument {
        filename: format!("{}.{}", base_name, format.extension()),
        content_type: format.content_type(),
        body,
    }
}
