use super::entry::{Entry, EntryKind};

/// Identity of the tool that generated a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolIdentity {
    pub vendor: String,
    pub name: String,
    pub version: String,
}

/// Synthetic root entry describing the cluster platform itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformComponent {
    pub name: String,
    pub version: String,
}

/// Document-level identity of an inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    serial_number: String,
    version: u32,
    timestamp: String,
    tools: Vec<ToolIdentity>,
    platform: Option<PlatformComponent>,
}

impl DocumentMetadata {
    pub fn new(
        serial_number: String,
        version: u32,
        timestamp: String,
        tools: Vec<ToolIdentity>,
        platform: Option<PlatformComponent>,
    ) -> Self {
        Self {
            serial_number,
            version,
            timestamp,
            tools,
            platform,
        }
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tools(&self) -> &[ToolIdentity] {
        &self.tools
    }

    pub fn platform(&self) -> Option<&PlatformComponent> {
        self.platform.as_ref()
    }
}

/// Inventory aggregate: document identity plus the entries of one collection run
///
/// Entries are appended in discovery order; [`Inventory::sort`] imposes the
/// canonical order once collection is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    metadata: DocumentMetadata,
    entries: Vec<Entry>,
}

impl Inventory {
    pub fn new(metadata: DocumentMetadata) -> Self {
        Self {
            metadata,
            entries: Vec::new(),
        }
    }

    pub fn with_entries(metadata: DocumentMetadata, entries: Vec<Entry>) -> Self {
        Self { metadata, entries }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn extend<I: IntoIterator<Item = Entry>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorts entries by kind, component kind, name and namespace, and the
    /// attributes of every entry by key.
    ///
    /// The sort is stable, so applying it twice yields the same sequence.
    pub fn sort(&mut self) {
        for entry in &mut self.entries {
            entry.sort_attributes();
        }
        self.entries.sort_by(|a, b| {
            a.kind()
                .cmp(&b.kind())
                .then_with(|| a.component_kind().cmp(b.component_kind()))
                .then_with(|| a.name().cmp(b.name()))
                .then_with(|| a.component_namespace().cmp(b.component_namespace()))
        });
    }

    /// Application entries with the given name, kind and namespace
    pub fn find_applications(&self, name: &str, component_kind: &str, namespace: &str) -> Vec<&Entry> {
        self.find(EntryKind::Application, Some(name), component_kind, namespace)
    }

    /// Container entries for the given image name seen in `namespace`
    pub fn find_containers(&self, name: &str, namespace: &str) -> Vec<&Entry> {
        self.find(EntryKind::Container, Some(name), "Image", namespace)
    }

    /// All entries of a class with the given component kind and namespace
    pub fn find_by_kind(&self, kind: EntryKind, component_kind: &str, namespace: &str) -> Vec<&Entry> {
        self.find(kind, None, component_kind, namespace)
    }

    fn find(
        &self,
        kind: EntryKind,
        name: Option<&str>,
        component_kind: &str,
        namespace: &str,
    ) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.kind() == kind)
            .filter(|e| name.map_or(true, |n| e.name() == n))
            .filter(|e| e.component_kind() == component_kind)
            .filter(|e| e.in_namespace(namespace))
            .collect()
    }
}
