use crate::inventory::domain::{keys, normalize_registry, Entry, EntryKind, Inventory};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

pub const EXISTS: &str = "Exists";
pub const MISSING: &str = "Missing";
pub const NULL: &str = "Null";

/// One row of a comparison report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub kind: EntryKind,
    pub component_kind: String,
    /// `namespace/name`, or just the name for cluster-scoped objects
    pub name: String,
    /// Attribute key, empty for presence rows
    pub property: String,
    pub expected: String,
    pub actual: String,
}

/// Classified differences between an expected and an actual inventory
///
/// Warnings report entries present on one side only; errors report
/// attribute mismatches on entries present on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    pub container_warnings: Vec<Discrepancy>,
    pub container_errors: Vec<Discrepancy>,
    pub application_warnings: Vec<Discrepancy>,
    pub application_errors: Vec<Discrepancy>,
}

impl ComparisonReport {
    pub fn has_errors(&self) -> bool {
        !self.container_errors.is_empty() || !self.application_errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.container_warnings.is_empty() || !self.application_warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// An entry reduced to its comparison key material
#[derive(Debug, Clone)]
struct Projected {
    name: String,
    component_kind: String,
    attributes: BTreeMap<String, BTreeSet<String>>,
}

impl Projected {
    fn from_entry(entry: &Entry, namespace: &str) -> Self {
        let name = if namespace.is_empty() {
            entry.name().to_string()
        } else {
            format!("{}/{}", namespace, entry.name())
        };
        let attributes = entry
            .attributes()
            .iter()
            .map(|a| (a.key().to_string(), a.values().clone()))
            .collect();
        Self {
            name,
            component_kind: entry.component_kind().to_string(),
            attributes,
        }
    }

    fn merge(&mut self, other: Projected) {
        for (key, values) in other.attributes {
            self.attributes.entry(key).or_default().extend(values);
        }
    }

    /// Sorted values joined with ","
    fn value(&self, key: &str) -> Option<String> {
        self.attributes
            .get(key)
            .map(|values| values.iter().cloned().collect::<Vec<_>>().join(","))
    }
}

type Projection = BTreeMap<String, Projected>;

/// Comparator service reconciling two inventories
///
/// Applications are keyed by identifier. Container entries are fanned out
/// per namespace value and keyed by `namespace/name`, with ECR registry
/// hosts wildcarded in the name. Multi-valued attributes compare as their
/// sorted values joined with ",". Comparison never fails.
pub struct Comparator;

impl Comparator {
    pub fn compare(expected: &Inventory, actual: &Inventory) -> ComparisonReport {
        let (container_warnings, container_errors) = Self::compare_projections(
            &Self::project(expected, EntryKind::Container),
            &Self::project(actual, EntryKind::Container),
            EntryKind::Container,
        );
        let (application_warnings, application_errors) = Self::compare_projections(
            &Self::project(expected, EntryKind::Application),
            &Self::project(actual, EntryKind::Application),
            EntryKind::Application,
        );

        ComparisonReport {
            container_warnings,
            container_errors,
            application_warnings,
            application_errors,
        }
    }

    fn project(inventory: &Inventory, kind: EntryKind) -> Projection {
        let mut projection = Projection::new();
        for entry in inventory.entries().iter().filter(|e| e.kind() == kind) {
            match kind {
                EntryKind::Application => {
                    let projected = Projected::from_entry(entry, entry.component_namespace());
                    Self::insert(&mut projection, entry.identifier().to_string(), projected);
                }
                EntryKind::Container => {
                    let namespaces: Vec<String> = entry
                        .attribute(keys::COMPONENT_NAMESPACE)
                        .map(|a| a.values().iter().cloned().collect())
                        .unwrap_or_else(|| vec![String::new()]);
                    let name = normalize_registry(entry.name());
                    for namespace in namespaces {
                        let mut projected = Projected::from_entry(entry, &namespace);
                        projected.attributes.insert(
                            keys::COMPONENT_NAMESPACE.to_string(),
                            BTreeSet::from([namespace.clone()]),
                        );
                        Self::insert(&mut projection, format!("{}/{}", namespace, name), projected);
                    }
                }
            }
        }
        projection
    }

    fn insert(projection: &mut Projection, key: String, projected: Projected) {
        match projection.entry(key) {
            btree_map::Entry::Occupied(mut existing) => existing.get_mut().merge(projected),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(projected);
            }
        }
    }

    fn compare_projections(
        expected: &Projection,
        actual: &Projection,
        kind: EntryKind,
    ) -> (Vec<Discrepancy>, Vec<Discrepancy>) {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        for (key, expected_entry) in expected {
            match actual.get(key) {
                None => warnings.push(Self::row(kind, expected_entry, "", EXISTS, MISSING)),
                Some(actual_entry) => {
                    errors.extend(Self::diff_attributes(kind, expected_entry, actual_entry))
                }
            }
        }

        for (key, actual_entry) in actual {
            if !expected.contains_key(key) {
                warnings.push(Self::row(kind, actual_entry, "", MISSING, EXISTS));
            }
        }

        (warnings, errors)
    }

    fn diff_attributes(kind: EntryKind, expected: &Projected, actual: &Projected) -> Vec<Discrepancy> {
        let mut rows = Vec::new();

        for key in expected.attributes.keys() {
            let expected_value = expected.value(key).unwrap_or_default();
            match actual.value(key) {
                None => rows.push(Self::row(kind, expected, key, &expected_value, NULL)),
                Some(actual_value) => {
                    if normalize_registry(&expected_value) != normalize_registry(&actual_value) {
                        rows.push(Self::row(kind, expected, key, &expected_value, &actual_value));
                    }
                }
            }
        }

        for key in actual.attributes.keys() {
            if !expected.attributes.contains_key(key) {
                let actual_value = actual.value(key).unwrap_or_default();
                rows.push(Self::row(kind, expected, key, NULL, &actual_value));
            }
        }

        rows
    }

    fn row(kind: EntryKind, entry: &Projected, property: &str, expected: &str, actual: &str) -> Discrepancy {
        Discrepancy {
            kind,
            component_kind: entry.component_kind.clone(),
            name: entry.name.clone(),
            property: property.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
