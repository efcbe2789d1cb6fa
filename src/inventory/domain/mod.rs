/// Domain model of the cluster inventory
pub mod attribute;
pub mod cluster_object;
pub mod entry;
pub mod filter;
pub mod identifier;
pub mod image_reference;
pub mod inventory;
pub mod owner;

pub use attribute::{keys, Attribute};
pub use cluster_object::{ClusterObject, ObjectPage, ResourceKind, NAMESPACE_KIND};
pub use entry::{Entry, EntryKind, Hash, License};
pub use filter::{Filter, NamespacedRule, NonNamespacedRule};
pub use identifier::{
    application_identifier, image_identifier, normalize_registry, ImagePurlScheme, ImageScope,
};
pub use image_reference::{sha256_from_image_id, ImageReference};
pub use inventory::{DocumentMetadata, Inventory, PlatformComponent, ToolIdentity};
pub use owner::{primary_owner, OwnerKey, OwnerResolution};
