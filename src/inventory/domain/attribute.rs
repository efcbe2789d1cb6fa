use crate::shared::error::CodexError;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Well-known attribute keys attached to inventory entries
pub mod keys {
    /// Kubernetes kind of the object, or `Image` for container entries
    pub const COMPONENT_KIND: &str = "clx:k8s:componentKind";
    /// Namespace the object lives in (multi-valued for shared images)
    pub const COMPONENT_NAMESPACE: &str = "clx:k8s:componentNamespace";
    /// Chart or CRD version for applications, image tag for containers
    pub const COMPONENT_VERSION: &str = "clx:k8s:componentVersion";
    /// Primary managing controller of the pod running the image
    pub const OWNER_REFERENCE: &str = "clx:k8s:ownerRef";
    /// Container group the image was found in: main, init or ephemeral
    pub const SOURCE_CONTAINER_CLASS: &str = "clx:k8s:source";
}

/// Attribute value object: a key with a non-empty, sorted, deduplicated set of values
///
/// Single-valued and multi-valued attributes share this representation.
/// Whether the values are emitted as a scalar or an array is decided by
/// the document formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    key: String,
    values: BTreeSet<String>,
}

impl Attribute {
    /// Creates an attribute with a single value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = BTreeSet::new();
        values.insert(value.into());
        Self {
            key: key.into(),
            values,
        }
    }

    /// Creates an attribute from any number of values
    ///
    /// # Errors
    /// Returns a validation error if `values` is empty
    pub fn with_values<I, S>(key: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into();
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(CodexError::Validation {
                message: format!("attribute '{}' must have at least one value", key),
            }
            .into());
        }
        Ok(Self { key, values })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    /// Returns the smallest value, which is the only one for scalar attributes
    pub fn first_value(&self) -> &str {
        self.values.iter().next().map(String::as_str).unwrap_or_default()
    }

    pub fn is_multi_valued(&self) -> bool {
        self.values.len() > 1
    }

    /// Adds a value, keeping the set sorted and deduplicated
    pub fn insert(&mut self, value: impl Into<String>) {
        self.values.insert(value.into());
    }

    /// Replaces all values with a single one
    pub fn replace(&mut self, value: impl Into<String>) {
        self.values.clear();
        self.values.insert(value.into());
    }

    /// Values joined with "," in sorted order
    pub fn joined(&self) -> String {
        self.values.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_single_value() {
        let attr = Attribute::new(keys::COMPONENT_KIND, "Deployment");
        assert_eq!(attr.key(), "clx:k8s:componentKind");
        assert_eq!(attr.first_value(), "Deployment");
        assert!(!attr.is_multi_valued());
    }

    #[test]
    fn test_with_values_sorts_and_dedups() {
        let attr =
            Attribute::with_values(keys::COMPONENT_NAMESPACE, ["web", "default", "web"]).unwrap();
        let values: Vec<_> = attr.values().iter().cloned().collect();
        assert_eq!(values, vec!["default", "web"]);
        assert!(attr.is_multi_valued());
    }

    #[test]
    fn test_with_values_rejects_empty() {
        let result = Attribute::with_values(keys::OWNER_REFERENCE, Vec::<String>::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_insert_and_replace() {
        let mut attr = Attribute::new(keys::COMPONENT_NAMESPACE, "b");
        attr.insert("a");
        attr.insert("b");
        assert_eq!(attr.joined(), "a,b");

        attr.replace("c");
        assert_eq!(attr.joined(), "c");
        assert!(!attr.is_multi_valued());
    }
}
