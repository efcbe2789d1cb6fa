use crate::inventory::services::comparator::{EXISTS, MISSING};
use crate::inventory::services::{ComparisonReport, Discrepancy};
use crate::ports::outbound::{ColumnLabels, ReportFormatter};
use crate::shared::Result;
use comfy_table::{presets::ASCII_FULL, Cell, Color, ColumnConstraint, Table, Width};

/// Cells longer than this are wrapped onto continuation lines
const MAX_CELL_WIDTH: u16 = 50;

const ERROR_NOTE: &str =
    "Note: An error is when there is a mismatch in the actual cluster vs expected BOM";
const WARNING_NOTE: &str = "Note: A warning is when additional containers or applications are present in actual cluster or in expected BOM";
const NO_ERRORS: &str = "No errors found during BOM comparison.";

/// TableReportFormatter adapter rendering a comparison report as text tables
///
/// The error section comes first, then the warning section. Expected values
/// are green and actual values red, except that `Missing` is always red and
/// `Exists` always green.
pub struct TableReportFormatter {
    color: bool,
}

impl TableReportFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render_section(&self, rows: &[&Discrepancy], labels: &ColumnLabels, with_property: bool) -> String {
        let mut header = vec!["Type", "Name"];
        if with_property {
            header.push("Property Name");
        }
        header.push(labels.expected.as_str());
        header.push(labels.actual.as_str());

        let mut table = Table::new();
        table.load_preset(ASCII_FULL).set_header(header);
        if self.color {
            table.enforce_styling();
        }

        // One table row per component, so separators fall between components
        for group in rows.chunk_by(|a, b| a.kind == b.kind && a.name == b.name) {
            let first = group[0];
            let mut cells = vec![Cell::new(first.kind.as_str()), Cell::new(&first.name)];
            if with_property {
                cells.push(Cell::new(Self::stacked(group, |row| &row.property)));
            }
            cells.push(self.value_cell(Self::stacked(group, |row| &row.expected), Color::Green));
            cells.push(self.value_cell(Self::stacked(group, |row| &row.actual), Color::Red));
            table.add_row(cells);
        }

        for column in table.column_iter_mut() {
            column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(
                MAX_CELL_WIDTH + 2,
            )));
        }

        format!("{}\n", table)
    }

    fn stacked(group: &[&Discrepancy], field: impl Fn(&Discrepancy) -> &String) -> String {
        group
            .iter()
            .map(|row| field(row).as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn value_cell(&self, value: String, tone: Color) -> Cell {
        if !self.color {
            return Cell::new(value);
        }
        let tone = match value.as_str() {
            MISSING => Color::Red,
            EXISTS => Color::Green,
            _ => tone,
        };
        Cell::new(value).fg(tone)
    }
}

impl Default for TableReportFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ReportFormatter for TableReportFormatter {
    fn format(&self, report: &ComparisonReport, labels: &ColumnLabels) -> Result<String> {
        let mut out = String::new();

        if report.has_errors() {
            out.push_str("ERROR!\n");
            out.push_str(ERROR_NOTE);
            out.push('\n');
            let rows: Vec<&Discrepancy> = report
                .container_errors
                .iter()
                .chain(&report.application_errors)
                .collect();
            out.push_str(&self.render_section(&rows, labels, true));
        }

        if report.has_warnings() {
            out.push_str("\nWARNING!\n");
            out.push_str(WARNING_NOTE);
            out.push('\n');
            let rows: Vec<&Discrepancy> = report
                .container_warnings
                .iter()
                .chain(&report.application_warnings)
                .collect();
            out.push_str(&self.render_section(&rows, labels, false));
        }

        if !report.has_errors() {
            out.push_str(NO_ERRORS);
            out.push('\n');
        }

        Ok(out)
    }
}
