use crate::inventory::domain::{ClusterObject, ObjectPage, OwnerKey, ResourceKind};
use crate::ports::outbound::{OwnerLookup, PodSource, ResourceCatalog};
use crate::shared::error::CodexError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::ReplicaSet;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::api::{Api, DynamicObject, ListParams};
use kube::config::KubeConfigOptions;
use kube::core::{ApiResource, GroupVersionKind};
use kube::discovery::{verbs, Discovery, Scope};
use kube::{Client, Config};
use std::time::Duration;
use tracing::debug;

/// Objects requested per list call
pub const PAGE_SIZE: u32 = 500;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);

/// KubeClusterClient adapter implementing every cluster read port
///
/// Discovery, dynamic listing, pod listing and owner lookups all go through
/// one authenticated `kube::Client`.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects using the ambient configuration, or the named kubeconfig context
    ///
    /// # Errors
    /// Returns [`CodexError::ClusterConnection`] when no usable configuration exists
    pub async fn connect(context: Option<&str>) -> Result<Self> {
        let mut config = match context {
            Some(name) => Config::from_kubeconfig(&KubeConfigOptions {
                context: Some(name.to_string()),
                ..Default::default()
            })
            .await
            .with_context(|| format!("Failed to load kubeconfig for context '{}'", name)),
            None => Config::infer()
                .await
                .context("Failed to infer cluster configuration"),
        }
        .map_err(|e| CodexError::ClusterConnection {
            details: format!("{:#}", e),
        })?;

        config.connect_timeout = Some(CONNECT_TIMEOUT);
        config.read_timeout = Some(READ_TIMEOUT);
        debug!(cluster_url = %config.cluster_url, "using cluster configuration");

        let client = Client::try_from(config).map_err(|e| CodexError::ClusterConnection {
            details: e.to_string(),
        })?;
        Ok(Self::new(client))
    }

    fn api_resource(kind: &ResourceKind) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(&kind.group, &kind.version, &kind.kind),
            &kind.plural,
        )
    }

    fn to_cluster_object(object: DynamicObject, kind: &ResourceKind) -> ClusterObject {
        let (api_version, object_kind) = match object.types {
            Some(types) => (types.api_version, types.kind),
            None => (kind.api_version(), kind.kind.clone()),
        };

        ClusterObject {
            api_version,
            kind: object_kind,
            name: object.metadata.name.unwrap_or_default(),
            namespace: object.metadata.namespace.unwrap_or_default(),
            labels: object.metadata.labels.unwrap_or_default(),
            spec: object.data.get("spec").cloned(),
        }
    }

    fn owner_keys(references: Option<Vec<OwnerReference>>) -> Vec<OwnerKey> {
        references
            .into_iter()
            .flatten()
            .map(|r| OwnerKey::new(r.kind, r.name))
            .collect()
    }
}

#[async_trait]
impl ResourceCatalog for KubeClusterClient {
    async fn server_version(&self) -> Result<String> {
        let info = self
            .client
            .apiserver_version()
            .await
            .context("Failed to query the API server version")?;
        Ok(info.git_version)
    }

    async fn discover_resource_kinds(&self) -> Result<Vec<ResourceKind>> {
        let discovery = Discovery::new(self.client.clone())
            .run()
            .await
            .context("API discovery failed")?;

        let mut kinds = Vec::new();
        for group in discovery.groups() {
            for (ar, caps) in group.recommended_resources() {
                if ar.plural.contains('/') || !caps.supports_operation(verbs::LIST) {
                    continue;
                }
                kinds.push(ResourceKind::new(
                    &ar.group,
                    &ar.version,
                    &ar.kind,
                    &ar.plural,
                    matches!(caps.scope, Scope::Namespaced),
                ));
            }
        }

        debug!(count = kinds.len(), "discovered listable resource kinds");
        Ok(kinds)
    }

    async fn list_objects(
        &self,
        kind: &ResourceKind,
        continue_token: Option<&str>,
    ) -> Result<ObjectPage> {
        let ar = Self::api_resource(kind);
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &ar);

        let mut params = ListParams::default().limit(PAGE_SIZE);
        if let Some(token) = continue_token {
            params = params.continue_token(token);
        }

        let list = api
            .list(&params)
            .await
            .with_context(|| format!("Failed to list {}", kind.plural))?;

        Ok(ObjectPage {
            continue_token: list.metadata.continue_.filter(|t| !t.is_empty()),
            items: list
                .items
                .into_iter()
                .map(|o| Self::to_cluster_object(o, kind))
                .collect(),
        })
    }
}

#[async_trait]
impl PodSource for KubeClusterClient {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let mut pods = Vec::new();
        let mut continue_token: Option<String> = None;

        loop {
            let mut params = ListParams::default().limit(PAGE_SIZE);
            if let Some(ref token) = continue_token {
                params = params.continue_token(token);
            }

            let list = api
                .list(&params)
                .await
                .with_context(|| format!("Failed to list pods in namespace '{}'", namespace))?;
            pods.extend(list.items);

            match list.metadata.continue_ {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        Ok(pods)
    }
}

#[async_trait]
impl OwnerLookup for KubeClusterClient {
    async fn replica_set_owners(&self, namespace: &str, name: &str) -> Result<Vec<OwnerKey>> {
        let api: Api<ReplicaSet> = Api::namespaced(self.client.clone(), namespace);
        let replica_set = api
            .get(name)
            .await
            .with_context(|| format!("Failed to get ReplicaSet {}/{}", namespace, name))?;
        Ok(Self::owner_keys(replica_set.metadata.owner_references))
    }

    async fn job_owners(&self, namespace: &str, name: &str) -> Result<Vec<OwnerKey>> {
        let api: Api<Job> = Api::namespaced(self.client.clone(), namespace);
        let job = api
            .get(name)
            .await
            .with_context(|| format!("Failed to get Job {}/{}", namespace, name))?;
        Ok(Self::owner_keys(job.metadata.owner_references))
    }
}
