use super::attribute::{keys, Attribute};
use std::fmt;

/// Class of an inventory entry
///
/// Declaration order is the canonical sort order: applications first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    /// A cluster object (Deployment, ConfigMap, Namespace, CRD instance, ...)
    Application,
    /// A container image observed in a running pod
    Container,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Application => "application",
            EntryKind::Container => "container",
        }
    }

    /// Parses the document `type` field; unknown types yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "application" => Some(EntryKind::Application),
            "container" => Some(EntryKind::Container),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// License metadata carried through from parsed documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct License {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Hash metadata carried through from parsed documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hash {
    pub algorithm: String,
    pub content: String,
}

/// Entry entity: one line item of the inventory
///
/// Attribute keys are unique within an entry. Licenses and hashes are
/// never computed here, only preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    name: String,
    version: String,
    identifier: String,
    attributes: Vec<Attribute>,
    licenses: Vec<License>,
    hashes: Vec<Hash>,
}

impl Entry {
    pub fn new(
        kind: EntryKind,
        name: impl Into<String>,
        version: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            version: version.into(),
            identifier: identifier.into(),
            attributes: Vec::new(),
            licenses: Vec::new(),
            hashes: Vec::new(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn licenses(&self) -> &[License] {
        &self.licenses
    }

    pub fn hashes(&self) -> &[Hash] {
        &self.hashes
    }

    pub fn with_licenses(mut self, licenses: Vec<License>) -> Self {
        self.licenses = licenses;
        self
    }

    pub fn with_hashes(mut self, hashes: Vec<Hash>) -> Self {
        self.hashes = hashes;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key() == key)
    }

    fn attribute_mut(&mut self, key: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.key() == key)
    }

    /// Adds an attribute, replacing any existing attribute with the same key
    pub fn put_attribute(&mut self, attribute: Attribute) {
        match self.attribute_mut(attribute.key()) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Sets `key` to exactly one value
    pub fn set_attribute(&mut self, key: &str, value: impl Into<String>) {
        match self.attribute_mut(key) {
            Some(existing) => existing.replace(value),
            None => self.attributes.push(Attribute::new(key, value)),
        }
    }

    /// Adds `value` to the set held under `key`, creating the attribute if needed
    pub fn union_attribute(&mut self, key: &str, value: impl Into<String>) {
        match self.attribute_mut(key) {
            Some(existing) => existing.insert(value),
            None => self.attributes.push(Attribute::new(key, value)),
        }
    }

    /// Smallest value of `key`, or "" when the attribute is absent
    pub fn attribute_value(&self, key: &str) -> &str {
        self.attribute(key).map(Attribute::first_value).unwrap_or("")
    }

    pub fn component_kind(&self) -> &str {
        self.attribute_value(keys::COMPONENT_KIND)
    }

    pub fn component_namespace(&self) -> &str {
        self.attribute_value(keys::COMPONENT_NAMESPACE)
    }

    /// Whether any value of the namespace attribute equals `namespace`
    pub fn in_namespace(&self, namespace: &str) -> bool {
        match self.attribute(keys::COMPONENT_NAMESPACE) {
            Some(attr) => attr.values().contains(namespace),
            None => namespace.is_empty(),
        }
    }

    pub(crate) fn sort_attributes(&mut self) {
        self.attributes.sort_by(|a, b| a.key().cmp(b.key()));
    }
}
