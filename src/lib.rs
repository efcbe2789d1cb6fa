//! cluster-codex - bill of materials for Kubernetes clusters
//!
//! This library walks a live cluster and records what runs in it as a
//! CycloneDX inventory: every listable API object kept by the filter becomes
//! an application entry, and every container image observed in pods becomes
//! a container entry. Two inventories can then be compared to detect drift.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Inventory model, identifiers, filter and comparator
//! - **Application Layer** (`application`): Collectors, use cases and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Kubernetes client, file system, console and formatters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cluster_codex::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let use_case = CompareInventoriesUseCase::new(FileSystemReader::new());
//! let report = use_case.execute(Path::new("expected.json"), Path::new("actual.json"))?;
//!
//! let formatter = TableReportFormatter::new(false);
//! let output = formatter.format(&report, &ColumnLabels::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CycloneDxFormatter, JsonReportFormatter, TableReportFormatter,
    };
    pub use crate::adapters::outbound::kubernetes::KubeClusterClient;
    pub use crate::application::dto::{GenerateRequest, GenerateResponse, ReportFormat};
    pub use crate::application::use_cases::{CompareInventoriesUseCase, GenerateInventoryUseCase};
    pub use crate::inventory::domain::{
        Attribute, ClusterObject, Entry, EntryKind, Filter, ImagePurlScheme, ImageReference,
        Inventory, OwnerKey, ResourceKind,
    };
    pub use crate::inventory::services::{Comparator, ComparisonReport, Discrepancy};
    pub use crate::ports::outbound::{
        ColumnLabels, InventoryFormatter, InventoryReader, OutputPresenter, OwnerLookup, PodSource,
        ProgressReporter, ReportFormatter, ResourceCatalog,
    };
    pub use crate::shared::Result;
}
