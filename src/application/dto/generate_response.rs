use crate::inventory::domain::Inventory;

/// GenerateResponse - Internal response DTO from the inventory generation use case
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// The collected inventory, sorted if requested
    pub inventory: Inventory,
    /// Number of application entries (cluster objects)
    pub application_count: usize,
    /// Number of distinct container images
    pub container_count: usize,
    /// Namespaces whose pods were scanned
    pub scanned_namespaces: Vec<String>,
    /// Resource kinds that could not be listed
    pub skipped_kinds: usize,
}
