use super::*;
use crate::inventory::domain::{
    keys, ClusterObject, EntryKind, NamespacedRule, NonNamespacedRule, ObjectPage, OwnerKey,
    ResourceKind,
};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, ContainerStatus, Pod, PodSpec, PodStatus};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::cell::RefCell;
use std::collections::HashMap;

// Mock implementations for testing
#[derive(Default)]
struct MockCluster {
    version: Option<String>,
    kinds: Vec<ResourceKind>,
    objects: HashMap<String, Vec<ClusterObject>>,
    pods: HashMap<String, Vec<Pod>>,
    replica_sets: HashMap<String, Vec<OwnerKey>>,
}

#[async_trait]
impl ResourceCatalog for MockCluster {
    async fn server_version(&self) -> Result<String> {
        self.version
            .clone()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))
    }

    async fn discover_resource_kinds(&self) -> Result<Vec<ResourceKind>> {
        Ok(self.kinds.clone())
    }

    async fn list_objects(
        &self,
        kind: &ResourceKind,
        _continue_token: Option<&str>,
    ) -> Result<ObjectPage> {
        Ok(ObjectPage {
            items: self.objects.get(&kind.plural).cloned().unwrap_or_default(),
            continue_token: None,
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
            .ok_or_else(|| anyhow::anyhow!("not found"))
    }

    async fn job_owners(&self, _namespace: &str, _name: &str) -> Result<Vec<OwnerKey>> {
        anyhow::bail!("not found")
    }
}

#[derive(Default)]
struct MockProgressReporter {
    messages: RefCell<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.messages.borrow_mut().push(format!(
            "{}/{} {}",
            current,
            total,
            message.unwrap_or_default()
        ));
    }

    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn object(api_version: &str, kind: &str, name: &str, namespace: &str) -> ClusterObject {
    ClusterObject {
        api_version: api_version.to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
        namespace: namespace.to_string(),
        ..Default::default()
    }
}

fn nginx_pod(name: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "nginx".to_string(),
                image: Some("nginx:1.25".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }),
        status: Some(PodStatus {
            container_statuses: Some(vec![ContainerStatus {
                name: "nginx".to_string(),
                image_id: "docker-pullable://nginx@sha256:aaaa".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    }
}

fn small_cluster() -> MockCluster {
    let mut cluster = MockCluster {
        version: Some("v1.31.2".to_string()),
        kinds: vec![
            ResourceKind::new("", "v1", "Namespace", "namespaces", false),
            ResourceKind::new("apps", "v1", "Deployment", "deployments", true),
        ],
        ..Default::default()
    };
    cluster.objects.insert(
        "namespaces".to_string(),
        vec![
            object("v1", "Namespace", "web", ""),
            object("v1", "Namespace", "api", ""),
        ],
    );
    cluster.objects.insert(
        "deployments".to_string(),
        vec![
            object("apps/v1", "Deployment", "web", "web"),
            object("apps/v1", "Deployment", "api", "api"),
        ],
    );
    cluster.pods.insert("web".to_string(), vec![nginx_pod("web-1")]);
    cluster.pods.insert("api".to_string(), vec![nginx_pod("api-1")]);
    cluster
}

#[tokio::test]
async fn test_generate_collects_resources_and_images() {
    let use_case = GenerateInventoryUseCase::new(small_cluster(), MockProgressReporter::default());

    let response = use_case.execute(GenerateRequest::default()).await.unwrap();

    assert_eq!(response.application_count, 4);
    assert_eq!(response.container_count, 1);
    assert_eq!(response.scanned_namespaces, vec!["api", "web"]);
    assert_eq!(response.inventory.len(), 5);

    let image = &response.inventory.find_containers("index.docker.io/library/nginx", "web")[0];
    assert_eq!(image.attribute_value(keys::COMPONENT_NAMESPACE), "api");
    assert_eq!(image.attribute(keys::COMPONENT_NAMESPACE).unwrap().joined(), "api,web");
}

#[tokio::test]
async fn test_generate_metadata_names_platform() {
    let use_case = GenerateInventoryUseCase::new(small_cluster(), MockProgressReporter::default());

    let response = use_case.execute(GenerateRequest::default()).await.unwrap();
    let platform = response.inventory.metadata().platform().unwrap();

    assert_eq!(platform.name, "kubernetes");
    assert_eq!(platform.version, "v1.31.2");
    assert!(response.inventory.metadata().serial_number().starts_with("urn:uuid:"));
}

#[tokio::test]
async fn test_generate_sorted_places_applications_first() {
    let use_case = GenerateInventoryUseCase::new(small_cluster(), MockProgressReporter::default());
    let request = GenerateRequest {
        sort: true,
        ..Default::default()
    };

    let response = use_case.execute(request).await.unwrap();
    let entries = response.inventory.entries();

    assert_eq!(entries[0].component_kind(), "Deployment");
    assert_eq!(entries[0].name(), "api");
    assert_eq!(entries[4].kind(), EntryKind::Container);
}

#[tokio::test]
async fn test_generate_explicit_namespaces_limit_image_scan() {
    let use_case = GenerateInventoryUseCase::new(small_cluster(), MockProgressReporter::default());
    let filter = Filter::new(
        NonNamespacedRule::new(Vec::<String>::new()),
        vec![NamespacedRule::new(
            vec!["web".to_string()],
            Vec::<String>::new(),
        )],
    );
    let request = GenerateRequest {
        filter,
        ..Default::default()
    };

    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.scanned_namespaces, vec!["web"]);
    let image = &response.inventory.find_containers("index.docker.io/library/nginx", "web")[0];
    assert_eq!(image.attribute(keys::COMPONENT_NAMESPACE).unwrap().joined(), "web");
}

#[tokio::test]
async fn test_generate_fails_without_connection() {
    let cluster = MockCluster::default();
    let use_case = GenerateInventoryUseCase::new(cluster, MockProgressReporter::default());

    let err = use_case.execute(GenerateRequest::default()).await.unwrap_err();
    assert!(err.to_string().contains("connect"));
}

#[tokio::test]
async fn test_generate_without_namespaces_skips_images() {
    let mut cluster = small_cluster();
    cluster.objects.remove("namespaces");
    let reporter = MockProgressReporter::default();
    let use_case = GenerateInventoryUseCase::new(cluster, reporter);

    let response = use_case.execute(GenerateRequest::default()).await.unwrap();

    assert_eq!(response.container_count, 0);
    assert!(use_case
        .progress_reporter
        .messages
        .borrow()
        .iter()
        .any(|m| m.contains("No namespaces to scan")));
}

#[tokio::test]
async fn test_generate_reports_namespace_progress() {
    let use_case = GenerateInventoryUseCase::new(small_cluster(), MockProgressReporter::default());

    use_case.execute(GenerateRequest::default()).await.unwrap();

    let messages = use_case.progress_reporter.messages.borrow();
    assert!(messages.iter().any(|m| m == "1/2 api"));
    assert!(messages.iter().any(|m| m == "2/2 web"));
}
