use crate::inventory::services::{ComparisonReport, Discrepancy};
use crate::ports::outbound::{ColumnLabels, ReportFormatter};
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    expected_label: &'a str,
    actual_label: &'a str,
    has_errors: bool,
    container_errors: Vec<Row<'a>>,
    application_errors: Vec<Row<'a>>,
    container_warnings: Vec<Row<'a>>,
    application_warnings: Vec<Row<'a>>,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    component_kind: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    property: &'a str,
    expected: &'a str,
    actual: &'a str,
}

fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

impl<'a> From<&'a Discrepancy> for Row<'a> {
    fn from(d: &'a Discrepancy) -> Self {
        Row {
            kind: d.kind.as_str(),
            component_kind: &d.component_kind,
            name: &d.name,
            property: &d.property,
            expected: &d.expected,
            actual: &d.actual,
        }
    }
}

/// JsonReportFormatter adapter rendering the four report buckets as JSON
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn rows(discrepancies: &[Discrepancy]) -> Vec<Row<'_>> {
    discrepancies.iter().map(Row::from).collect()
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, report: &ComparisonReport, labels: &ColumnLabels) -> Result<String> {
        let document = ReportDocument {
            expected_label: &labels.expected,
            actual_label: &labels.actual,
            has_errors: report.has_errors(),
            container_errors: rows(&report.container_errors),
            application_errors: rows(&report.application_errors),
            container_warnings: rows(&report.container_warnings),
            application_warnings: rows(&report.application_warnings),
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}
