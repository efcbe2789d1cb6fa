use crate::application::collectors::{ImageCollector, ResourceCollector};
use crate::application::dto::{GenerateRequest, GenerateResponse};
use crate::inventory::domain::{Entry, Filter, Inventory};
use crate::inventory::services::MetadataGenerator;
use crate::ports::outbound::{OwnerLookup, PodSource, ProgressReporter, ResourceCatalog};
use crate::shared::error::CodexError;
use crate::shared::Result;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// GenerateInventoryUseCase - Core use case for building a cluster inventory
///
/// Resources are collected first; the namespaces they reveal become the
/// image scan scope unless the filter names namespaces explicitly.
///
/// # Type Parameters
/// * `C` - Cluster client implementing every cluster read port
/// * `PR` - ProgressReporter implementation
pub struct GenerateInventoryUseCase<C, PR> {
    cluster: C,
    progress_reporter: PR,
}

impl<C, PR> GenerateInventoryUseCase<C, PR>
where
    C: ResourceCatalog + PodSource + OwnerLookup,
    PR: ProgressReporter,
{
    /// Creates a new GenerateInventoryUseCase with injected dependencies
    pub fn new(cluster: C, progress_reporter: PR) -> Self {
        Self {
            cluster,
            progress_reporter,
        }
    }

    /// Executes the inventory generation use case
    ///
    /// # Errors
    /// Fails when the cluster cannot be reached, discovery fails or pods of a
    /// scanned namespace cannot be listed. Per-kind listing failures are
    /// logged and skipped.
    pub async fn execute(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        // Step 1: Identify the cluster
        let platform_version = self.read_platform_version().await?;

        // Step 2: Collect cluster objects
        self.progress_reporter
            .report("📦 Discovering and listing cluster resources...");
        let resources = ResourceCollector::new(&self.cluster)
            .collect(&request.filter)
            .await?;
        self.progress_reporter.report(&format!(
            "✅ Collected {} resource(s)",
            resources.entries.len()
        ));
        if resources.skipped_kinds > 0 {
            self.progress_reporter.report(&format!(
                "   - {} resource kind(s) could not be listed and were skipped",
                resources.skipped_kinds
            ));
        }

        // Step 3: Decide which namespaces to scan for images
        let namespaces = Self::scan_scope(&request.filter, &resources.namespaces);

        // Step 4: Collect running images
        let images = self.collect_images(&request, &namespaces).await?;

        // Step 5: Assemble the document
        let application_count = resources.entries.len();
        let container_count = images.len();
        let metadata = MetadataGenerator::generate_default_metadata(&platform_version);
        let mut entries: Vec<Entry> = resources.entries;
        entries.extend(images);
        let mut inventory = Inventory::with_entries(metadata, entries);

        // Step 6: Optional canonical ordering
        if request.sort {
            inventory.sort();
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Inventory complete: {} application(s), {} container image(s)",
            application_count, container_count
        ));

        Ok(GenerateResponse {
            inventory,
            application_count,
            container_count,
            scanned_namespaces: namespaces,
            skipped_kinds: resources.skipped_kinds,
        })
    }

    async fn read_platform_version(&self) -> Result<String> {
        self.progress_reporter.report("🔌 Connecting to cluster...");
        let version = self
            .cluster
            .server_version()
            .await
            .map_err(|e| CodexError::ClusterConnection {
                details: format!("{:#}", e),
            })?;
        info!(version = %version, "connected to cluster");
        Ok(version)
    }

    /// Explicit filter namespaces win; otherwise every discovered namespace is scanned.
    fn scan_scope(filter: &Filter, discovered: &BTreeSet<String>) -> Vec<String> {
        let explicit = filter.namespace_list();
        if explicit.is_empty() {
            debug!(count = discovered.len(), "scanning discovered namespaces");
            discovered.iter().cloned().collect()
        } else {
            debug!(count = explicit.len(), "scanning filter namespaces");
            explicit.into_iter().collect()
        }
    }

    async fn collect_images(
        &self,
        request: &GenerateRequest,
        namespaces: &[String],
    ) -> Result<Vec<Entry>> {
        if namespaces.is_empty() {
            self.progress_reporter
                .report("⚠️  No namespaces to scan, skipping container images");
            return Ok(Vec::new());
        }

        self.progress_reporter.report(&format!(
            "🐳 Scanning running images in {} namespace(s)...",
            namespaces.len()
        ));
        let collector = ImageCollector::new(&self.cluster, &self.cluster, request.image_scheme);
        let on_namespace = |current: usize, total: usize, namespace: &str| {
            self.progress_reporter
                .report_progress(current, total, Some(namespace));
        };
        let images = match collector.collect_with_progress(namespaces, &on_namespace).await {
            Ok(images) => images,
            Err(e) => {
                self.progress_reporter
                    .report_error("❌ Image scan aborted");
                return Err(e);
            }
        };

        Ok(images)
    }
}

#[cfg(test)]
mod tests;
