use crate::inventory::domain::{
    application_identifier, keys, ClusterObject, Entry, EntryKind, Filter, ResourceKind,
    NAMESPACE_KIND,
};
use crate::ports::outbound::ResourceCatalog;
use crate::shared::error::CodexError;
use crate::shared::Result;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Resources that routinely refuse listing for ordinary credentials.
/// Their failures are logged at debug instead of warn.
const QUIET_RESOURCES: &[&str] = &[
    "bindings",
    "tokenreviews",
    "selfsubjectreviews",
    "subjectaccessreviews",
    "selfsubjectrulesreviews",
    "localsubjectaccessreviews",
    "selfsubjectaccessreviews",
    "kcm",
    "ksh",
];

/// Custom kind whose `spec.version` carries its version
const HELM_CHART_KIND: &str = "HelmChart";
/// Label consulted for the version of every other kind
const HELM_CHART_LABEL: &str = "helm.sh/chart";

/// Result of a resource collection pass
#[derive(Debug, Clone, Default)]
pub struct ResourceCollection {
    pub entries: Vec<Entry>,
    /// Names of every Namespace object seen, whether or not it was filtered out
    pub namespaces: BTreeSet<String>,
    /// Number of resource kinds whose listing failed and were skipped
    pub skipped_kinds: usize,
}

/// What one resource kind contributed; committed only if every page listed
#[derive(Default)]
struct KindContribution {
    entries: Vec<Entry>,
    namespaces: Vec<String>,
}

/// ResourceCollector - turns every listable cluster object into an application entry
pub struct ResourceCollector<'a, C> {
    catalog: &'a C,
}

impl<'a, C: ResourceCatalog> ResourceCollector<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Collects application entries for all discovered kinds
    ///
    /// # Errors
    /// Returns an error only if discovery itself fails. A kind that cannot be
    /// listed is logged and contributes nothing.
    pub async fn collect(&self, filter: &Filter) -> Result<ResourceCollection> {
        let kinds = self
            .catalog
            .discover_resource_kinds()
            .await
            .map_err(|e| CodexError::ResourceDiscovery {
                details: format!("{:#}", e),
            })?;
        info!(kinds = kinds.len(), "discovered resource kinds");

        let mut collection = ResourceCollection::default();
        for kind in &kinds {
            match self.collect_kind(kind, filter).await {
                Ok(contribution) => {
                    debug!(
                        resource = %kind.plural,
                        entries = contribution.entries.len(),
                        "collected resource kind"
                    );
                    collection.entries.extend(contribution.entries);
                    collection.namespaces.extend(contribution.namespaces);
                }
                Err(e) => {
                    collection.skipped_kinds += 1;
                    if QUIET_RESOURCES.contains(&kind.plural.as_str()) {
                        debug!(resource = %kind.plural, error = %e, "failed to list resources");
                    } else {
                        warn!(resource = %kind.plural, error = %e, "failed to list resources");
                    }
                }
            }
        }

        Ok(collection)
    }

    async fn collect_kind(&self, kind: &ResourceKind, filter: &Filter) -> Result<KindContribution> {
        let mut contribution = KindContribution::default();
        let mut continue_token: Option<String> = None;

        loop {
            let page = self
                .catalog
                .list_objects(kind, continue_token.as_deref())
                .await?;

            for object in &page.items {
                if object.kind == NAMESPACE_KIND {
                    contribution.namespaces.push(object.name.clone());
                }
                if Self::is_included(kind, object, filter) {
                    contribution.entries.push(Self::build_entry(object));
                }
            }

            match page.continue_token {
                Some(token) if !token.is_empty() => continue_token = Some(token),
                _ => break,
            }
        }

        Ok(contribution)
    }

    fn is_included(kind: &ResourceKind, object: &ClusterObject, filter: &Filter) -> bool {
        if kind.namespaced {
            filter.should_include_resource(&object.namespace, &object.kind)
        } else {
            filter.should_include_cluster_resource(&object.kind)
        }
    }

    fn build_entry(object: &ClusterObject) -> Entry {
        let identifier = application_identifier(
            &object.kind,
            &object.name,
            &object.namespace,
            &object.api_version,
        );
        let mut entry = Entry::new(
            EntryKind::Application,
            &object.name,
            &object.api_version,
            identifier,
        );
        entry.set_attribute(keys::COMPONENT_KIND, &object.kind);
        entry.set_attribute(keys::COMPONENT_NAMESPACE, &object.namespace);
        if let Some(version) = Self::component_version(object) {
            entry.set_attribute(keys::COMPONENT_VERSION, version);
        }
        entry
    }

    fn component_version(object: &ClusterObject) -> Option<&str> {
        if object.kind == HELM_CHART_KIND {
            if let Some(version) = object.spec_str("version") {
                return Some(version);
            }
        }
        object.label(HELM_CHART_LABEL)
    }
}
