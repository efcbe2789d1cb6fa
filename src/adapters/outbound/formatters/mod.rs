/// Formatter adapters for inventory documents and comparison reports
mod cyclonedx_formatter;
mod json_report_formatter;
mod table_report_formatter;

pub use cyclonedx_formatter::CycloneDxFormatter;
pub use json_report_formatter::JsonReportFormatter;
pub use table_report_formatter::TableReportFormatter;
