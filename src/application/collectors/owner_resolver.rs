use crate::inventory::domain::owner::{JOB_KIND, REPLICA_SET_KIND};
use crate::inventory::domain::{primary_owner, OwnerKey, OwnerResolution};
use crate::ports::outbound::OwnerLookup;
use std::collections::HashSet;
use tracing::{info, warn};

/// Maximum number of intermediate controllers looked through per pod
pub const MAX_OWNER_HOPS: usize = 1;

/// OwnerResolver - determines the primary managing controller of a pod
///
/// The highest-priority owner reference is chosen first. When it is a
/// ReplicaSet or Job, that controller is fetched and the choice is repeated
/// over its own owners, up to [`MAX_OWNER_HOPS`] times.
pub struct OwnerResolver<'a, O> {
    lookup: &'a O,
}

impl<'a, O: OwnerLookup> OwnerResolver<'a, O> {
    pub fn new(lookup: &'a O) -> Self {
        Self { lookup }
    }

    /// Resolves the primary owner of a pod in `namespace` with the given owner references.
    ///
    /// Lookup failures never fail the pod: the intermediate controller itself
    /// is returned as [`OwnerResolution::Unresolved`].
    pub async fn resolve(&self, namespace: &str, owners: &[OwnerKey]) -> OwnerResolution {
        let Some(mut chosen) = primary_owner(owners).cloned() else {
            return OwnerResolution::Unowned;
        };

        let mut visited = HashSet::from([chosen.clone()]);
        let mut intermediate: Option<OwnerKey> = None;
        let mut hops = 0;

        while chosen.is_intermediate() && hops < MAX_OWNER_HOPS {
            hops += 1;
            let parents = match self.fetch_owners(namespace, &chosen).await {
                Ok(parents) => parents,
                Err(e) => {
                    info!(
                        namespace,
                        owner = %chosen,
                        error = %e,
                        "could not fetch intermediate owner, keeping it as the pod owner"
                    );
                    return OwnerResolution::Unresolved(chosen);
                }
            };

            let Some(next) = primary_owner(&parents).cloned() else {
                break;
            };
            if !visited.insert(next.clone()) {
                warn!(namespace, owner = %chosen, "owner reference cycle detected");
                break;
            }

            if intermediate.is_none() {
                intermediate = Some(chosen);
            }
            chosen = next;
        }

        match intermediate {
            Some(intermediate) => OwnerResolution::ViaIntermediate {
                owner: chosen,
                intermediate,
            },
            // A ReplicaSet or Job without owners of its own stays the pod owner
            None if chosen.is_intermediate() => OwnerResolution::Unresolved(chosen),
            None => OwnerResolution::Direct(chosen),
        }
    }

    async fn fetch_owners(&self, namespace: &str, owner: &OwnerKey) -> crate::shared::Result<Vec<OwnerKey>> {
        match owner.kind.as_str() {
            REPLICA_SET_KIND => self.lookup.replica_set_owners(namespace, &owner.name).await,
            JOB_KIND => self.lookup.job_owners(namespace, &owner.name).await,
            _ => Ok(Vec::new()),
        }
    }
}
