use crate::inventory::domain::Inventory;
use crate::inventory::services::ComparisonReport;
use crate::shared::Result;

/// InventoryFormatter port for serializing an inventory document
pub trait InventoryFormatter {
    /// Formats the inventory as a document string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, inventory: &Inventory) -> Result<String>;
}

/// Column headers for the expected and actual sides of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabels {
    pub expected: String,
    pub actual: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            expected: "Expected".to_string(),
            actual: "Actual".to_string(),
        }
    }
}

/// ReportFormatter port for rendering comparison reports
pub trait ReportFormatter {
    /// Renders the report
    ///
    /// # Arguments
    /// * `report` - Classified differences
    /// * `labels` - Headers for the expected and actual columns
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format(&self, report: &ComparisonReport, labels: &ColumnLabels) -> Result<String>;
}
