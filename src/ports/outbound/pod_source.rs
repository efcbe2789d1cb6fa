use crate::shared::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;

/// PodSource port for listing the pods of a namespace
#[async_trait]
pub trait PodSource: Send + Sync {
    /// Lists all pods in `namespace`
    ///
    /// # Errors
    /// Returns an error if the list call fails
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;
}
