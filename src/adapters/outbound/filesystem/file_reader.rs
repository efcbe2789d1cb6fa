use crate::adapters::outbound::formatters::CycloneDxFormatter;
use crate::inventory::domain::Inventory;
use crate::ports::outbound::InventoryReader;
use crate::shared::error::CodexError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// FileSystemReader adapter for reading inventory documents from disk
///
/// Only regular files up to [`MAX_FILE_SIZE`] are read; symbolic links
/// are refused.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a file after the security checks
    fn safe_read_file(&self, path: &Path, description: &str) -> Result<String> {
        validate_regular_file(path, description)?;

        let metadata = fs::metadata(path).map_err(|e| CodexError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            CodexError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryReader for FileSystemReader {
    fn read_inventory(&self, path: &Path) -> Result<Inventory> {
        let content = self.safe_read_file(path, "inventory document")?;
        let inventory = CycloneDxFormatter::parse(&content).map_err(|e| CodexError::InventoryParse {
            path: path.to_path_buf(),
            details: format!("{:#}", e),
        })?;
        debug!(path = %path.display(), entries = inventory.len(), "read inventory");
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "bomFormat": "CycloneDX",
        "specVersion": "1.6",
        "serialNumber": "urn:uuid:1",
        "version": 1,
        "metadata": {"timestamp": "2024-05-01T12:00:00Z", "tools": []},
        "components": [
            {"type": "application", "name": "web", "version": "apps/v1", "purl": "pkg:k8s/Deployment/web"}
        ]
    }"#;

    #[test]
    fn test_read_inventory_success() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.json");
        fs::write(&path, MINIMAL).unwrap();

        let inventory = FileSystemReader::new().read_inventory(&path).unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.metadata().serial_number(), "urn:uuid:1");
    }

    #[test]
    fn test_read_inventory_not_found() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileSystemReader::new()
            .read_inventory(&temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_read_inventory_invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.json");
        fs::write(&path, "{\"hello\": 1}").unwrap();

        let err = FileSystemReader::new().read_inventory(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CodexError>(),
            Some(CodexError::InventoryParse { .. })
        ));
    }

    #[test]
    fn test_read_inventory_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileSystemReader::new().read_inventory(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("is not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_inventory_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("bom.json");
        fs::write(&target, MINIMAL).unwrap();
        let link = temp_dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = FileSystemReader::new().read_inventory(&link).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CodexError>(),
            Some(CodexError::SecurityError { .. })
        ));
    }
}
