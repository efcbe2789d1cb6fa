use crate::inventory::domain::{DocumentMetadata, PlatformComponent, ToolIdentity};
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

pub const TOOL_VENDOR: &str = "guidewire";
pub const TOOL_NAME: &str = "cluster-codex";
pub const PLATFORM_NAME: &str = "kubernetes";

/// MetadataGenerator service for document identity
///
/// Every call produces a fresh serial number and a UTC timestamp with
/// whole-second precision.
pub struct MetadataGenerator;

impl MetadataGenerator {
    /// Generates metadata for a new document describing a cluster
    ///
    /// # Arguments
    /// * `tool_version` - Version of the generating tool
    /// * `platform_version` - Server version reported by the cluster
    pub fn generate_metadata(tool_version: &str, platform_version: &str) -> DocumentMetadata {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        DocumentMetadata::new(
            serial_number,
            1,
            timestamp,
            vec![ToolIdentity {
                vendor: TOOL_VENDOR.to_string(),
                name: TOOL_NAME.to_string(),
                version: tool_version.to_string(),
            }],
            Some(PlatformComponent {
                name: PLATFORM_NAME.to_string(),
                version: platform_version.to_string(),
            }),
        )
    }

    /// Generates metadata using the compile-time version from Cargo.toml
    pub fn generate_default_metadata(platform_version: &str) -> DocumentMetadata {
        Self::generate_metadata(env!("CARGO_PKG_VERSION"), platform_version)
    }
}
