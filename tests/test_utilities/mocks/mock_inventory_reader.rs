use cluster_codex::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock InventoryReader serving documents from memory, keyed by path
#[derive(Default)]
pub struct MockInventoryReader {
    documents: HashMap<PathBuf, String>,
}

impl MockInventoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        self.documents.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl InventoryReader for MockInventoryReader {
    fn read_inventory(&self, path: &Path) -> Result<Inventory> {
        let content = self
            .documents
            .get(path)
            .ok_or_else(|| anyhow::anyhow!("no such document: {}", path.display()))?;
        CycloneDxFormatter::parse(content)
    }
}
