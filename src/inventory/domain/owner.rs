use std::fmt;

/// Controller kinds ranked from most to least preferred as a pod's primary owner
pub const OWNER_PRIORITY: [&str; 4] = ["Deployment", "StatefulSet", "DaemonSet", "CronJob"];

/// Intermediate controller kinds whose own owners are looked up once
pub const REPLICA_SET_KIND: &str = "ReplicaSet";
pub const JOB_KIND: &str = "Job";

/// Kind and name of an owning object, displayed as `Kind/Name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerKey {
    pub kind: String,
    pub name: String,
}

impl OwnerKey {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn is_intermediate(&self) -> bool {
        self.kind == REPLICA_SET_KIND || self.kind == JOB_KIND
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Outcome of resolving a pod's primary owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerResolution {
    /// The pod declares no owner references
    Unowned,
    /// The chosen reference is not an intermediate controller
    Direct(OwnerKey),
    /// The chosen reference was a ReplicaSet or Job whose own owner was used
    ViaIntermediate { owner: OwnerKey, intermediate: OwnerKey },
    /// An intermediate controller could not be resolved further
    Unresolved(OwnerKey),
}

impl OwnerResolution {
    /// The key recorded on image entries, if any
    pub fn owner(&self) -> Option<&OwnerKey> {
        match self {
            OwnerResolution::Unowned => None,
            OwnerResolution::Direct(owner)
            | OwnerResolution::ViaIntermediate { owner, .. }
            | OwnerResolution::Unresolved(owner) => Some(owner),
        }
    }
}

/// Picks the highest-priority owner among `candidates`, or the first one
/// when no candidate has a ranked kind.
pub fn primary_owner(candidates: &[OwnerKey]) -> Option<&OwnerKey> {
    OWNER_PRIORITY
        .iter()
        .find_map(|kind| candidates.iter().find(|c| c.kind == *kind))
        .or_else(|| candidates.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_key_display() {
        assert_eq!(OwnerKey::new("Deployment", "web").to_string(), "Deployment/web");
    }

    #[test]
    fn test_primary_owner_priority() {
        let candidates = vec![
            OwnerKey::new("CronJob", "nightly"),
            OwnerKey::new("StatefulSet", "db"),
            OwnerKey::new("DaemonSet", "agent"),
        ];
        assert_eq!(primary_owner(&candidates).unwrap().name, "db");
    }

    #[test]
    fn test_primary_owner_falls_back_to_first() {
        let candidates = vec![
            OwnerKey::new("Node", "worker-1"),
            OwnerKey::new("Rollout", "canary"),
        ];
        assert_eq!(primary_owner(&candidates).unwrap().kind, "Node");
    }

    #[test]
    fn test_primary_owner_empty() {
        assert!(primary_owner(&[]).is_none());
    }

    #[test]
    fn test_resolution_owner() {
        let key = OwnerKey::new("ReplicaSet", "web-abc");
        assert_eq!(OwnerResolution::Unowned.owner(), None);
        assert_eq!(OwnerResolution::Unresolved(key.clone()).owner(), Some(&key));
        assert!(key.is_intermediate());
    }
}
