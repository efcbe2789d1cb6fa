use super::owner_resolver::OwnerResolver;
use crate::inventory::domain::{
    image_identifier, keys, sha256_from_image_id, Entry, EntryKind, ImagePurlScheme,
    ImageReference, ImageScope, OwnerKey,
};
use crate::ports::outbound::{OwnerLookup, PodSource};
use crate::shared::error::CodexError;
use crate::shared::Result;
use k8s_openapi::api::core::v1::{Container, ContainerStatus, EphemeralContainer, Pod};
use std::collections::HashMap;
use tracing::{debug, info, warn};

const IMAGE_COMPONENT_KIND: &str = "Image";

/// Container group an image was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerClass {
    Main,
    Init,
    Ephemeral,
}

impl ContainerClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerClass::Main => "main",
            ContainerClass::Init => "init",
            ContainerClass::Ephemeral => "ephemeral",
        }
    }
}

/// Name and image of any container variant in a pod spec
pub trait ContainerSpec {
    fn name(&self) -> &str;
    fn image(&self) -> Option<&str>;
}

impl ContainerSpec for Container {
    fn name(&self) -> &str {
        &self.name
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl ContainerSpec for EphemeralContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// Entries collected so far, indexed by identifier for merging
#[derive(Default)]
struct ImageLedger {
    entries: Vec<Entry>,
    by_identifier: HashMap<String, usize>,
}

/// One running container image, ready to be recorded
struct Observation<'a> {
    namespace: &'a str,
    owner: Option<&'a str>,
    class: ContainerClass,
    reference: ImageReference,
    digest: Option<String>,
}

impl ImageLedger {
    fn record(&mut self, scheme: ImagePurlScheme, observation: Observation<'_>) {
        let version = observation.reference.version().to_string();
        let identifier = image_identifier(
            scheme,
            &observation.reference,
            observation.digest.as_deref(),
            ImageScope {
                owner: observation.owner,
                namespace: Some(observation.namespace),
            },
        );

        if let Some(&index) = self.by_identifier.get(&identifier) {
            let entry = &mut self.entries[index];
            entry.union_attribute(keys::COMPONENT_NAMESPACE, observation.namespace);
            entry.set_attribute(keys::SOURCE_CONTAINER_CLASS, observation.class.as_str());
            entry.set_attribute(keys::COMPONENT_VERSION, version.as_str());
            entry.set_version(version);
            return;
        }

        let mut entry = Entry::new(
            EntryKind::Container,
            observation.reference.name(),
            version.as_str(),
            identifier.as_str(),
        );
        entry.set_attribute(keys::COMPONENT_KIND, IMAGE_COMPONENT_KIND);
        entry.set_attribute(keys::COMPONENT_NAMESPACE, observation.namespace);
        entry.set_attribute(keys::SOURCE_CONTAINER_CLASS, observation.class.as_str());
        if let Some(owner) = observation.owner {
            entry.set_attribute(keys::OWNER_REFERENCE, owner);
        }
        entry.set_attribute(keys::COMPONENT_VERSION, version);

        debug!(image = %entry.name(), namespace = observation.namespace, "recorded new image");
        self.by_identifier.insert(identifier, self.entries.len());
        self.entries.push(entry);
    }
}

/// ImageCollector - records every running container image in the scanned namespaces
///
/// Images are deduplicated by identifier: the same image and digest seen in
/// several pods or namespaces becomes one entry whose namespace attribute
/// lists every namespace.
pub struct ImageCollector<'a, P, O> {
    pods: &'a P,
    resolver: OwnerResolver<'a, O>,
    scheme: ImagePurlScheme,
}

impl<'a, P: PodSource, O: OwnerLookup> ImageCollector<'a, P, O> {
    pub fn new(pods: &'a P, owners: &'a O, scheme: ImagePurlScheme) -> Self {
        Self {
            pods,
            resolver: OwnerResolver::new(owners),
            scheme,
        }
    }

    /// Collects container entries for the given namespaces
    ///
    /// # Errors
    /// Returns an error if the pods of any namespace cannot be listed; the
    /// whole run is aborted in that case.
    pub async fn collect(&self, namespaces: &[String]) -> Result<Vec<Entry>> {
        self.collect_with_progress(namespaces, &|_, _, _| {}).await
    }

    /// Same as [`collect`](Self::collect), calling `on_namespace(current, total, namespace)`
    /// before each namespace is listed.
    pub async fn collect_with_progress(
        &self,
        namespaces: &[String],
        on_namespace: &dyn Fn(usize, usize, &str),
    ) -> Result<Vec<Entry>> {
        let mut ledger = ImageLedger::default();

        for (index, namespace) in namespaces.iter().enumerate() {
            on_namespace(index + 1, namespaces.len(), namespace);
            let pods = self
                .pods
                .list_pods(namespace)
                .await
                .map_err(|e| CodexError::PodListing {
                    namespace: namespace.clone(),
                    details: format!("{:#}", e),
                })?;
            info!(namespace = %namespace, pods = pods.len(), "listing pods");

            for pod in &pods {
                self.collect_pod(namespace, pod, &mut ledger).await;
            }
        }

        Ok(ledger.entries)
    }

    async fn collect_pod(&self, namespace: &str, pod: &Pod, ledger: &mut ImageLedger) {
        let owners: Vec<OwnerKey> = pod
            .metadata
            .owner_references
            .iter()
            .flatten()
            .map(|r| OwnerKey::new(&r.kind, &r.name))
            .collect();
        if owners.is_empty() {
            debug!(pod = ?pod.metadata.name, namespace, "pod has no owner references");
        }
        let resolution = self.resolver.resolve(namespace, &owners).await;
        let owner = resolution.owner().map(ToString::to_string);

        let Some(spec) = pod.spec.as_ref() else {
            return;
        };
        let status = pod.status.as_ref();
        let ephemeral_statuses: &[ContainerStatus] = status
            .and_then(|s| s.ephemeral_container_statuses.as_deref())
            .unwrap_or_default();
        let init_statuses: &[ContainerStatus] = status
            .and_then(|s| s.init_container_statuses.as_deref())
            .unwrap_or_default();
        let main_statuses: &[ContainerStatus] = status
            .and_then(|s| s.container_statuses.as_deref())
            .unwrap_or_default();

        let groups: [(ContainerClass, Vec<&dyn ContainerSpec>, &[ContainerStatus]); 3] = [
            (
                ContainerClass::Ephemeral,
                spec.ephemeral_containers
                    .iter()
                    .flatten()
                    .map(|c| c as &dyn ContainerSpec)
                    .collect(),
                ephemeral_statuses,
            ),
            (
                ContainerClass::Init,
                spec.init_containers
                    .iter()
                    .flatten()
                    .map(|c| c as &dyn ContainerSpec)
                    .collect(),
                init_statuses,
            ),
            (
                ContainerClass::Main,
                spec.containers
                    .iter()
                    .map(|c| c as &dyn ContainerSpec)
                    .collect(),
                main_statuses,
            ),
        ];

        for (class, containers, container_statuses) in groups {
            for container in containers {
                if let Some(observation) =
                    Self::observe(namespace, owner.as_deref(), class, container, container_statuses)
                {
                    ledger.record(self.scheme, observation);
                }
            }
        }
    }

    fn observe<'o>(
        namespace: &'o str,
        owner: Option<&'o str>,
        class: ContainerClass,
        container: &dyn ContainerSpec,
        statuses: &[ContainerStatus],
    ) -> Option<Observation<'o>> {
        let status = statuses.iter().find(|s| s.name == container.name());
        let terminated = status
            .and_then(|s| s.state.as_ref())
            .is_some_and(|state| state.terminated.is_some());
        if terminated {
            debug!(container = container.name(), namespace, "skipping terminated container");
            return None;
        }

        let image = container.image()?;
        let reference = match ImageReference::parse(image) {
            Ok(reference) => reference,
            Err(e) => {
                warn!(image, namespace, error = %e, "skipping container with unparsable image");
                return None;
            }
        };

        let digest = status
            .and_then(|s| sha256_from_image_id(&s.image_id))
            .or_else(|| reference.digest().and_then(|d| d.strip_prefix("sha256:")))
            .map(str::to_string);
        if digest.is_none() {
            debug!(image, namespace, "no sha256 digest found for image");
        }

        Some(Observation {
            namespace,
            owner,
            class,
            reference,
            digest,
        })
    }
}
