/// Mock implementations for testing
mod mock_cluster;
mod mock_inventory_reader;
mod mock_progress_reporter;

pub use mock_cluster::{image_pod, MockCluster};
pub use mock_inventory_reader::MockInventoryReader;
pub use mock_progress_reporter::MockProgressReporter;
