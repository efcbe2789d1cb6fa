/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains the outbound ports (driven ports) through which the
/// collectors and use cases reach the cluster, the file system and the console.
pub mod outbound;
