//! Tabular report data shared by the HTML and CSV writers.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::models::{ContributionRow, DepartmentSummaryRow, MonthlySummaryRow};

/// A row type that can be laid out as report columns.
pub trait ToReportRow {
    /// Column names, in output order.
    fn columns() -> &'static [&'static str];

    /// Cell values, one per column, in the same order as [`columns`](Self::columns).
    fn cells(&self) -> Vec<String>;
}

/// A titled table of string cells, ready for export.
///
/// Each row maps column name to cell, in column order.
///
/// # Example
///
/// ```
/// use esi_engine::report::ReportTable;
///
/// let mut table = ReportTable::new("ESI Report", ["emp_code", "total_esi"]);
/// table.push_row(["EMP001", "599.63"]);
/// assert_eq!(table.rows()[0]["total_esi"], "599.63");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    title: String,
    columns: Vec<String>,
    rows: Vec<IndexMap<String, String>>,
}

impl ReportTable {
    /// Creates an empty table with the given title and columns.
    pub fn new<I, S>(title: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Lays out typed rows under their declared columns.
    pub fn from_rows<R: ToReportRow>(title: impl Into<String>, rows: &[R]) -> Self {
        let mut table = Self::new(title, R::columns().iter().copied());
        for row in rows {
            table.push_row(row.cells());
        }
        table
    }

    /// Appends a row. Cells are paired with columns by position; missing
    /// cells are left empty and surplus cells are dropped.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = cells.into_iter();
        let row = self
            .columns
            .iter()
            .map(|column| {
                let cell = cells.next().map(Into::into).unwrap_or_default();
                (column.clone(), cell)
            })
            .collect();
        self.rows.push(row);
    }

    /// The table title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Column names in output order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows, in insertion order.
    pub fn rows(&self) -> &[IndexMap<String, String>] {
        &self.rows
    }

    /// Returns true when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn amount(value: Decimal) -> String {
    value.to_string()
}

fn date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

impl ToReportRow for ContributionRow {
    fn columns() -> &'static [&'static str] {
        &[
            "emp_code",
            "first_name",
            "last_name",
            "esi_number",
            "department_name",
            "period_name",
            "start_date",
            "end_date",
            "esi_wages",
            "employee_esi",
            "employer_esi",
            "total_esi",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.emp_code.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.esi_number.clone().unwrap_or_default(),
            self.department_name.clone(),
            self.period_name.clone(),
            date(self.start_date),
            date(self.end_date),
            amount(self.esi_wages),
            amount(self.employee_esi),
            amount(self.employer_esi),
            amount(self.total_esi),
        ]
    }
}

impl ToReportRow for DepartmentSummaryRow {
    fn columns() -> &'static [&'static str] {
        &[
            "department_name",
            "employee_count",
            "total_employee_esi",
            "total_employer_esi",
            "total_esi_contribution",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.department_name.clone(),
            self.employee_count.to_string(),
            amount(self.total_employee_esi),
            amount(self.total_employer_esi),
            amount(self.total_esi_contribution),
        ]
    }
}

impl ToReportRow for MonthlySummaryRow {
    fn columns() -> &'static [&'static str] {
        &[
            "period_name",
            "start_date",
            "end_date",
            "employee_count",
            "employee_contribution",
            "employer_contribution",
            "total_contribution",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.period_name.clone(),
            date(self.start_date),
            date(self.end_date),
            self.employee_count.to_string(),
            amount(self.employee_contribution),
            amount(self.employer_contribution),
            amount(self.total_contribution),
        ]
    }
}
