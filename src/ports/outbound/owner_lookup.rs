use crate::inventory::domain::OwnerKey;
use crate::shared::Result;
use async_trait::async_trait;

/// OwnerLookup port for fetching intermediate controllers
///
/// Used only while resolving a pod's primary owner, to see through
/// ReplicaSets and Jobs to the controller that manages them.
#[async_trait]
pub trait OwnerLookup: Send + Sync {
    /// Returns the owner references of a ReplicaSet
    ///
    /// # Errors
    /// Returns an error if the ReplicaSet cannot be fetched
    async fn replica_set_owners(&self, namespace: &str, name: &str) -> Result<Vec<OwnerKey>>;

    /// Returns the owner references of a Job
    ///
    /// # Errors
    /// Returns an error if the Job cannot be fetched
    async fn job_owners(&self, namespace: &str, name: &str) -> Result<Vec<OwnerKey>>;
}
