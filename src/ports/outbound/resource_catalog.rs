use crate::inventory::domain::{ObjectPage, ResourceKind};
use crate::shared::Result;
use async_trait::async_trait;

/// ResourceCatalog port for discovering and listing cluster objects
///
/// This port abstracts the cluster's discovery and list APIs. Listing is
/// paginated: callers pass back the continuation token of the previous
/// page until none is returned.
///
/// Implementations must be `Send + Sync` so collection can be driven from
/// any tokio worker.
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// Returns the server's git version, e.g. `v1.31.2`
    ///
    /// # Errors
    /// Returns an error if the server cannot be reached
    async fn server_version(&self) -> Result<String>;

    /// Discovers every listable resource kind at its preferred version
    ///
    /// # Errors
    /// Returns an error if discovery fails; this aborts the run
    async fn discover_resource_kinds(&self) -> Result<Vec<ResourceKind>>;

    /// Lists one page of objects of `kind` across all namespaces
    ///
    /// # Arguments
    /// * `kind` - The resource kind to list
    /// * `continue_token` - Token from the previous page, `None` for the first page
    ///
    /// # Errors
    /// Returns an error if the list call fails (forbidden, not found, transport error)
    async fn list_objects(
        &self,
        kind: &ResourceKind,
        continue_token: Option<&str>,
    ) -> Result<ObjectPage>;
}
