/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (cluster API, file system, console, etc.).
pub mod formatter;
pub mod inventory_reader;
pub mod output_presenter;
pub mod owner_lookup;
pub mod pod_source;
pub mod progress_reporter;
pub mod resource_catalog;

pub use formatter::{ColumnLabels, InventoryFormatter, ReportFormatter};
pub use inventory_reader::InventoryReader;
pub use output_presenter::OutputPresenter;
pub use owner_lookup::OwnerLookup;
pub use pod_source::PodSource;
pub use progress_reporter::ProgressReporter;
pub use resource_catalog::ResourceCatalog;
