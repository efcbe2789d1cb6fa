use std::collections::BTreeSet;

/// Wildcard token accepted in namespace and resource lists
pub const WILDCARD: &str = "*";

/// One namespace-scoped inclusion rule, normalized at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacedRule {
    namespaces: BTreeSet<String>,
    resources: BTreeSet<String>,
    case_insensitive_resources: bool,
}

impl NamespacedRule {
    /// Builds a normalized rule.
    ///
    /// Empty namespace or resource lists become `{"*"}`. When the namespace
    /// list contains `*` it collapses to exactly `{"*"}` and the resource
    /// names of this rule, and only this rule, are lower-cased and matched
    /// without regard to case. Rules with explicit namespaces keep their
    /// resource names verbatim and match them exactly.
    pub fn new<N, R>(namespaces: N, resources: R) -> Self
    where
        N: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
    {
        let mut namespaces: BTreeSet<String> = namespaces.into_iter().collect();
        let mut resources: BTreeSet<String> = resources.into_iter().collect();

        if namespaces.is_empty() {
            namespaces.insert(WILDCARD.to_string());
        }
        if resources.is_empty() {
            resources.insert(WILDCARD.to_string());
        }

        let all_namespaces = namespaces.contains(WILDCARD);
        if all_namespaces {
            namespaces = BTreeSet::from([WILDCARD.to_string()]);
            resources = resources.into_iter().map(|r| r.to_lowercase()).collect();
        }

        Self {
            namespaces,
            resources,
            case_insensitive_resources: all_namespaces,
        }
    }

    pub fn namespaces(&self) -> &BTreeSet<String> {
        &self.namespaces
    }

    pub fn resources(&self) -> &BTreeSet<String> {
        &self.resources
    }

    fn matches(&self, namespace: &str, kind: &str) -> bool {
        let namespace_matches =
            self.namespaces.contains(WILDCARD) || self.namespaces.contains(namespace);
        if !namespace_matches {
            return false;
        }

        if self.resources.contains(WILDCARD) {
            return true;
        }
        if self.case_insensitive_resources {
            self.resources.contains(&kind.to_lowercase())
        } else {
            self.resources.contains(kind)
        }
    }
}

/// Inclusion policy for cluster-scoped objects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NonNamespacedRule {
    resources: BTreeSet<String>,
}

impl NonNamespacedRule {
    pub fn new<R: IntoIterator<Item = String>>(resources: R) -> Self {
        Self {
            resources: resources.into_iter().collect(),
        }
    }

    pub fn resources(&self) -> &BTreeSet<String> {
        &self.resources
    }
}

/// Filter value object deciding which objects enter the inventory
///
/// Built once from configuration and passed explicitly to the collectors;
/// it is never mutated during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    non_namespaced: NonNamespacedRule,
    namespaced: Vec<NamespacedRule>,
}

impl Filter {
    pub fn new(non_namespaced: NonNamespacedRule, namespaced: Vec<NamespacedRule>) -> Self {
        Self {
            non_namespaced,
            namespaced,
        }
    }

    /// A filter that includes every object
    pub fn include_all() -> Self {
        Self::default()
    }

    pub fn namespaced_rules(&self) -> &[NamespacedRule] {
        &self.namespaced
    }

    pub fn non_namespaced_rule(&self) -> &NonNamespacedRule {
        &self.non_namespaced
    }

    /// Whether a namespaced object of `kind` in `namespace` is included.
    ///
    /// Without namespaced rules every object is included; otherwise at
    /// least one rule must match both namespace and kind.
    pub fn should_include_resource(&self, namespace: &str, kind: &str) -> bool {
        if self.namespaced.is_empty() {
            return true;
        }
        self.namespaced
            .iter()
            .any(|rule| rule.matches(namespace, kind))
    }

    /// Whether every cluster-scoped kind is included
    pub fn includes_all_non_namespaced_kinds(&self) -> bool {
        self.non_namespaced.resources.is_empty() || self.non_namespaced.resources.contains(WILDCARD)
    }

    /// Whether a cluster-scoped object of `kind` is included
    pub fn should_include_cluster_resource(&self, kind: &str) -> bool {
        self.includes_all_non_namespaced_kinds() || self.non_namespaced.resources.contains(kind)
    }

    /// Union of the namespaces named by all rules.
    ///
    /// An empty result means namespaces must be discovered from the cluster,
    /// either because there are no rules or because a rule covers `*`.
    pub fn namespace_list(&self) -> BTreeSet<String> {
        let union: BTreeSet<String> = self
            .namespaced
            .iter()
            .flat_map(|rule| rule.namespaces.iter().cloned())
            .collect();
        if union.contains(WILDCARD) {
            BTreeSet::new()
        } else {
            union
        }
    }
}
