use crate::inventory::domain::{
    Attribute, DocumentMetadata, Entry, EntryKind, Hash, Inventory, License, PlatformComponent,
    ToolIdentity,
};
use crate::ports::outbound::InventoryFormatter;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

const BOM_FORMAT: &str = "CycloneDX";
const SPEC_VERSION: &str = "1.6";
const PLATFORM_TYPE: &str = "platform";

#[derive(Debug, Serialize, Deserialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: String,
    #[serde(rename = "specVersion")]
    spec_version: String,
    #[serde(rename = "serialNumber", default)]
    serial_number: String,
    #[serde(default = "default_document_version")]
    version: u32,
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    components: Vec<Component>,
}

fn default_document_version() -> u32 {
    1
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Metadata {
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<RootComponent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Tool {
    #[serde(default)]
    vendor: String,
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RootComponent {
    #[serde(rename = "type")]
    component_type: String,
    name: String,
    #[serde(default)]
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Component {
    #[serde(rename = "type")]
    component_type: String,
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    purl: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    licenses: Vec<LicenseChoice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hashes: Vec<HashContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Property {
    name: String,
    value: PropertyValue,
}

/// A single value is written as a plain string, several as an array
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum PropertyValue {
    Single(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize, Deserialize)]
struct LicenseChoice {
    license: LicenseContent,
}

#[derive(Debug, Serialize, Deserialize)]
struct LicenseContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HashContent {
    alg: String,
    content: String,
}

/// CycloneDxFormatter adapter for the CycloneDX 1.6 JSON inventory document
///
/// Writes inventories through the InventoryFormatter port and parses them
/// back for comparison.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Parses a CycloneDX JSON document into an inventory
    ///
    /// Property values may be a string or an array of strings. Components of
    /// any type other than application or container are skipped.
    ///
    /// # Errors
    /// Returns an error if the text is not a CycloneDX JSON document
    pub fn parse(content: &str) -> Result<Inventory> {
        let bom: Bom = serde_json::from_str(content)?;
        if bom.bom_format != BOM_FORMAT {
            anyhow::bail!(
                "unsupported bomFormat '{}', expected '{}'",
                bom.bom_format,
                BOM_FORMAT
            );
        }

        let metadata = DocumentMetadata::new(
            bom.serial_number,
            bom.version,
            bom.metadata.timestamp,
            bom.metadata
                .tools
                .into_iter()
                .map(|t| ToolIdentity {
                    vendor: t.vendor,
                    name: t.name,
                    version: t.version,
                })
                .collect(),
            bom.metadata.component.map(|c| PlatformComponent {
                name: c.name,
                version: c.version,
            }),
        );

        let entries = bom
            .components
            .into_iter()
            .filter_map(Self::parse_component)
            .collect();

        Ok(Inventory::with_entries(metadata, entries))
    }

    fn parse_component(component: Component) -> Option<Entry> {
        let Some(kind) = EntryKind::parse(&component.component_type) else {
            warn!(
                component = %component.name,
                component_type = %component.component_type,
                "skipping component of unsupported type"
            );
            return None;
        };

        let mut entry = Entry::new(kind, component.name, component.version, component.purl)
            .with_licenses(
                component
                    .licenses
                    .into_iter()
                    .map(|l| License {
                        id: l.license.id,
                        name: l.license.name,
                    })
                    .collect(),
            )
            .with_hashes(
                component
                    .hashes
                    .into_iter()
                    .map(|h| Hash {
                        algorithm: h.alg,
                        content: h.content,
                    })
                    .collect(),
            );

        for property in component.properties {
            let values = match property.value {
                PropertyValue::Single(value) => vec![value],
                PropertyValue::Many(values) => values,
            };
            match Attribute::with_values(property.name, values) {
                Ok(attribute) => entry.put_attribute(attribute),
                Err(e) => warn!(component = %entry.name(), error = %e, "dropping empty property"),
            }
        }

        Some(entry)
    }

    fn build_metadata(metadata: &DocumentMetadata) -> Metadata {
        Metadata {
            timestamp: metadata.timestamp().to_string(),
            tools: metadata
                .tools()
                .iter()
                .map(|t| Tool {
                    vendor: t.vendor.clone(),
                    name: t.name.clone(),
                    version: t.version.clone(),
                })
                .collect(),
            component: metadata.platform().map(|p| RootComponent {
                component_type: PLATFORM_TYPE.to_string(),
                name: p.name.clone(),
                version: p.version.clone(),
            }),
        }
    }

    fn build_component(entry: &Entry) -> Component {
        Component {
            component_type: entry.kind().as_str().to_string(),
            name: entry.name().to_string(),
            version: entry.version().to_string(),
            purl: entry.identifier().to_string(),
            properties: entry
                .attributes()
                .iter()
                .map(|a| Property {
                    name: a.key().to_string(),
                    value: if a.is_multi_valued() {
                        PropertyValue::Many(a.values().iter().cloned().collect())
                    } else {
                        PropertyValue::Single(a.first_value().to_string())
                    },
                })
                .collect(),
            licenses: entry
                .licenses()
                .iter()
                .map(|l| LicenseChoice {
                    license: LicenseContent {
                        id: l.id.clone(),
                        name: l.name.clone(),
                    },
                })
                .collect(),
            hashes: entry
                .hashes()
                .iter()
                .map(|h| HashContent {
                    alg: h.algorithm.clone(),
                    content: h.content.clone(),
                })
                .collect(),
        }
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryFormatter for CycloneDxFormatter {
    fn format(&self, inventory: &Inventory) -> Result<String> {
        let metadata = inventory.metadata();
        let bom = Bom {
            bom_format: BOM_FORMAT.to_string(),
            spec_version: SPEC_VERSION.to_string(),
            serial_number: metadata.serial_number().to_string(),
            version: metadata.version(),
            metadata: Self::build_metadata(metadata),
            components: inventory
                .entries()
                .iter()
                .map(Self::build_component)
                .collect(),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}
