use crate::inventory::domain::Inventory;
use crate::shared::Result;
use std::path::Path;

/// InventoryReader port for loading previously written inventory documents
pub trait InventoryReader {
    /// Reads and parses the inventory document at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file fails security checks (symlink, size limit)
    /// - The content is not a valid inventory document
    fn read_inventory(&self, path: &Path) -> Result<Inventory>;
}
