/// Kubernetes adapters backed by the kube client
mod cluster_client;

pub use cluster_client::{KubeClusterClient, PAGE_SIZE};
