/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the cluster, the filesystem
/// and the terminal.
pub mod outbound;
