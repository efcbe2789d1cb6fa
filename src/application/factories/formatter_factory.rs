use crate::adapters::outbound::formatters::{JsonReportFormatter, TableReportFormatter};
use crate::application::dto::ReportFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating comparison report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct ReportFormatterFactory;

impl ReportFormatterFactory {
    /// Creates a formatter instance for the specified report format
    ///
    /// # Arguments
    /// * `format` - The report format to create a formatter for
    /// * `color` - Whether the table renderer may emit ANSI colors
    ///
    /// # Examples
    /// ```
    /// use cluster_codex::application::dto::ReportFormat;
    /// use cluster_codex::application::factories::ReportFormatterFactory;
    ///
    /// let formatter = ReportFormatterFactory::create(ReportFormat::Table, false);
    /// ```
    pub fn create(format: ReportFormat, color: bool) -> Box<dyn ReportFormatter> {
        match format {
            ReportFormat::Table => Box::new(TableReportFormatter::new(color)),
            ReportFormat::Json => Box::new(JsonReportFormatter::new()),
        }
    }

    /// Returns the progress message for the specified report format
    ///
    /// # Examples
    /// ```
    /// use cluster_codex::application::dto::ReportFormat;
    /// use cluster_codex::application::factories::ReportFormatterFactory;
    ///
    /// let message = ReportFormatterFactory::progress_message(ReportFormat::Json);
    /// assert_eq!(message, "📝 Rendering comparison report as JSON...");
    /// ```
    pub fn progress_message(format: ReportFormat) -> &'static str {
        match format {
            ReportFormat::Table => "📝 Rendering comparison report as tables...",
            ReportFormat::Json => "📝 Rendering comparison report as JSON...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::services::ComparisonReport;
    use crate::ports::outbound::ColumnLabels;

    #[test]
    fn test_create_json_formatter() {
        let formatter = ReportFormatterFactory::create(ReportFormat::Json, false);
        let output = formatter
            .format(&ComparisonReport::default(), &ColumnLabels::default())
            .unwrap();
        assert!(output.contains("container_errors"));
    }

    #[test]
    fn test_create_table_formatter() {
        let formatter = ReportFormatterFactory::create(ReportFormat::Table, false);
        let output = formatter
            .format(&ComparisonReport::default(), &ColumnLabels::default())
            .unwrap();
        assert!(output.contains("No errors found during BOM comparison."));
    }

    #[test]
    fn test_progress_message_table() {
        let message = ReportFormatterFactory::progress_message(ReportFormat::Table);
        assert_eq!(message, "📝 Rendering comparison report as tables...");
    }
}
