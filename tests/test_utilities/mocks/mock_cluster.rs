use async_trait::async_trait;
use cluster_codex::prelude::*;
use cluster_codex::inventory::domain::ObjectPage;
use k8s_openapi::api::core::v1::{Container, ContainerStatus, Pod, PodSpec, PodStatus};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory cluster serving discovery, paginated lists, pods and owners
pub struct MockCluster {
    version: String,
    page_size: usize,
    kinds: Vec<ResourceKind>,
    objects: HashMap<String, Vec<ClusterObject>>,
    forbidden: HashSet<String>,
    pods: HashMap<String, Vec<Pod>>,
    replica_sets: HashMap<String, Vec<OwnerKey>>,
    /// Number of list calls made per plural
    pub list_calls: Mutex<HashMap<String, usize>>,
}

impl MockCluster {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            page_size: 500,
            kinds: Vec::new(),
            objects: HashMap::new(),
            forbidden: HashSet::new(),
            pods: HashMap::new(),
            replica_sets: HashMap::new(),
            list_calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_kind(mut self, kind: ResourceKind, objects: Vec<ClusterObject>) -> Self {
        self.objects.insert(kind.plural.clone(), objects);
        self.kinds.push(kind);
        self
    }

    /// Registers a kind whose list calls fail with a forbidden error
    pub fn with_forbidden_kind(mut self, kind: ResourceKind) -> Self {
        self.forbidden.insert(kind.plural.clone());
        self.kinds.push(kind);
        self
    }

    pub fn with_pod(mut self, namespace: &str, pod: Pod) -> Self {
        self.pods.entry(namespace.to_string()).or_default().push(pod);
        self
    }

    pub fn with_replica_set(mut self, name: &str, owners: Vec<OwnerKey>) -> Self {
        self.replica_sets.insert(name.to_string(), owners);
        self
    }

    pub fn list_call_count(&self, plural: &str) -> usize {
        self.list_calls
            .lock()
            .unwrap()
            .get(plural)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ResourceCatalog for MockCluster {
    async fn server_version(&self) -> Result<String> {
        Ok(self.version.clone())
    }

    async fn discover_resource_kinds(&self) -> Result<Vec<ResourceKind>> {
        Ok(self.kinds.clone())
    }

    async fn list_objects(
        &self,
        kind: &ResourceKind,
        continue_token: Option<&str>,
    ) -> Result<ObjectPage> {
        *self
            .list_calls
            .lock()
            .unwrap()
            .entry(kind.plural.clone())
            .or_default() += 1;

        if self.forbidden.contains(&kind.plural) {
            anyhow::bail!("{} is forbidden", kind.plural);
        }

        let all = self.objects.get(&kind.plural).cloned().unwrap_or_default();
        let start: usize = continue_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(all.len());
        let continue_token = (end < all.len()).then(|| end.to_string());

        Ok(ObjectPage {
            items: all[start..end].to_vec(),
            continue_token,
        })
    }
}

#[async_trait]
impl PodSource for MockCluster {
    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        Ok(self.pods.get(namespace).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl OwnerLookup for MockCluster {
    async fn replica_set_owners(&self, _namespace: &str, name: &str) -> Result<Vec<OwnerKey>> {
        self.replica_sets
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("replicasets \"{}\" not found", name))
    }

    async fn job_owners(&self, _namespace: &str, name: &str) -> Result<Vec<OwnerKey>> {
        anyhow::bail!("jobs \"{}\" not found", name)
    }
}

/// Builds a running pod with one main container, optionally owned by `owner`
pub fn image_pod(name: &str, image: &str, image_id: &str, owner: Option<(&str, &str)>) -> Pod {
    let owner_references = owner.map(|(kind, owner_name)| {
        vec![OwnerReference {
            api_version: "apps/v1".to_string(),
            kind: kind.to_string(),
            name: owner_name.to_string(),
            uid: format!("uid-{}", owner_name),
            controller: Some(true),
            ..Default::default()
        }]
    });

    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            owner_references,
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "main".to_string(),
                image: Some(image.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }),
        status: Some(PodStatus {
            container_statuses: Some(vec![ContainerStatus {
                name: "main".to_string(),
                image: image.to_string(),
                image_id: image_id.to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    }
}
