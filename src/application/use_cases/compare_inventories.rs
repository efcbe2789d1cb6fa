use crate::inventory::domain::Inventory;
use crate::inventory::services::{Comparator, ComparisonReport};
use crate::ports::outbound::InventoryReader;
use crate::shared::Result;
use std::path::Path;
use tracing::info;

/// CompareInventoriesUseCase - Loads two inventory documents and diffs them
///
/// # Type Parameters
/// * `R` - InventoryReader implementation
pub struct CompareInventoriesUseCase<R: InventoryReader> {
    reader: R,
}

impl<R: InventoryReader> CompareInventoriesUseCase<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads both documents and classifies every difference
    ///
    /// # Errors
    /// Fails only if a document cannot be read or parsed. Differences are
    /// data in the returned report, never errors.
    pub fn execute(&self, expected: &Path, actual: &Path) -> Result<ComparisonReport> {
        let expected = self.reader.read_inventory(expected)?;
        let actual = self.reader.read_inventory(actual)?;
        Ok(Self::compare_loaded(&expected, &actual))
    }

    /// Compares two inventories that are already in memory
    pub fn compare_loaded(expected: &Inventory, actual: &Inventory) -> ComparisonReport {
        let report = Comparator::compare(expected, actual);
        info!(
            container_errors = report.container_errors.len(),
            container_warnings = report.container_warnings.len(),
            application_errors = report.application_errors.len(),
            application_warnings = report.application_warnings.len(),
            "comparison finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{keys, DocumentMetadata, Entry, EntryKind};
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MockReader {
        documents: HashMap<PathBuf, Inventory>,
    }

    impl InventoryReader for MockReader {
        fn read_inventory(&self, path: &Path) -> Result<Inventory> {
            self.documents
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
        }
    }

    fn metadata() -> DocumentMetadata {
        DocumentMetadata::new(
            "urn:uuid:test".to_string(),
            1,
            "2024-01-01T00:00:00Z".to_string(),
            vec![],
            None,
        )
    }

    fn etcd(version: &str) -> Inventory {
        let mut entry = Entry::new(
            EntryKind::Container,
            "registry.k8s.io/etcd",
            version,
            "pkg:oci/etcd?repository_url=registry.k8s.io%2Fetcd",
        );
        entry.set_attribute(keys::COMPONENT_KIND, "Image");
        entry.set_attribute(keys::COMPONENT_NAMESPACE, "kube-system");
        entry.set_attribute(keys::COMPONENT_VERSION, version);
        Inventory::with_entries(metadata(), vec![entry])
    }

    fn reader() -> MockReader {
        let mut documents = HashMap::new();
        documents.insert(PathBuf::from("expected.json"), etcd("3.5.7-0"));
        documents.insert(PathBuf::from("actual.json"), etcd("3.5.7-1"));
        MockReader { documents }
    }

    #[test]
    fn test_execute_reports_version_drift() {
        let use_case = CompareInventoriesUseCase::new(reader());

        let report = use_case
            .execute(Path::new("expected.json"), Path::new("actual.json"))
            .unwrap();

        assert_eq!(report.container_errors.len(), 1);
        assert_eq!(report.container_errors[0].expected, "3.5.7-0");
        assert_eq!(report.container_errors[0].actual, "3.5.7-1");
        assert!(report.container_warnings.is_empty());
    }

    #[test]
    fn test_execute_same_document_is_clean() {
        let use_case = CompareInventoriesUseCase::new(reader());

        let report = use_case
            .execute(Path::new("expected.json"), Path::new("expected.json"))
            .unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_execute_propagates_read_failure() {
        let use_case = CompareInventoriesUseCase::new(reader());

        let result = use_case.execute(Path::new("expected.json"), Path::new("missing.json"));
        assert!(result.is_err());
    }
}
