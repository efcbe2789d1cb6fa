use std::collections::BTreeMap;

/// Kind name of namespace objects, whose names seed the image scan scope
pub const NAMESPACE_KIND: &str = "Namespace";

/// An API resource kind the server can list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKind {
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Plural resource name as used in API paths, e.g. `deployments`
    pub plural: String,
    /// Selects which filter rule applies to the kind's objects
    pub namespaced: bool,
}

impl ResourceKind {
    pub fn new(group: &str, version: &str, kind: &str, plural: &str, namespaced: bool) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
            plural: plural.to_string(),
            namespaced,
        }
    }

    /// `group/version`, or just `version` for the core group
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

/// A listed cluster object reduced to the fields the inventory needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterObject {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    /// Empty for cluster-scoped objects
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    /// The object's `spec`, when it has one
    pub spec: Option<serde_json::Value>,
}

impl ClusterObject {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// String field of the object's spec
    pub fn spec_str(&self, field: &str) -> Option<&str> {
        self.spec.as_ref()?.get(field)?.as_str()
    }
}

/// One page of a paginated list call
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub items: Vec<ClusterObject>,
    /// Continuation token for the next page; `None` or empty when done
    pub continue_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_version_core_group() {
        let kind = ResourceKind::new("", "v1", "ConfigMap", "configmaps", true);
        assert_eq!(kind.api_version(), "v1");
    }

    #[test]
    fn test_api_version_named_group() {
        let kind = ResourceKind::new("apps", "v1", "Deployment", "deployments", true);
        assert_eq!(kind.api_version(), "apps/v1");
    }

    #[test]
    fn test_spec_str() {
        let object = ClusterObject {
            kind: "HelmChart".to_string(),
            spec: Some(json!({"version": "1.2.3", "replicas": 2})),
            ..Default::default()
        };
        assert_eq!(object.spec_str("version"), Some("1.2.3"));
        assert_eq!(object.spec_str("replicas"), None);
        assert_eq!(object.spec_str("missing"), None);
        assert!(object.namespace.is_empty());
    }
}
