/// Collectors that read cluster state through outbound ports
///
/// Each collector owns one step of a generate run: listing resources,
/// resolving pod owners, and recording running images.
mod image_collector;
mod owner_resolver;
mod resource_collector;

pub use image_collector::{ContainerClass, ContainerSpec, ImageCollector};
pub use owner_resolver::{OwnerResolver, MAX_OWNER_HOPS};
pub use resource_collector::{ResourceCollection, ResourceCollector};
