use crate::shared::error::CodexError;
use crate::shared::Result;

/// Registry assumed for references without an explicit host
pub const DEFAULT_REGISTRY: &str = "index.docker.io";

const DOCKER_HUB_ALIAS: &str = "docker.io";
const DEFAULT_TAG: &str = "latest";
const OFFICIAL_REPOSITORY_PREFIX: &str = "library/";

/// ImageReference value object: a container image reference split into its parts
///
/// `nginx:1.25` parses to registry `index.docker.io`, repository
/// `library/nginx` and tag `1.25`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    registry: String,
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageReference {
    /// Parses a reference of the form `[registry/]repository[:tag][@algorithm:hex]`.
    ///
    /// # Errors
    /// Returns a validation error for empty references, references with
    /// whitespace or upper-case repository paths, and empty path components.
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = |reason: &str| -> anyhow::Error {
            CodexError::Validation {
                message: format!("invalid image reference '{}': {}", reference, reason),
            }
            .into()
        };

        if reference.is_empty() {
            return Err(invalid("reference is empty"));
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(invalid("reference contains whitespace"));
        }

        let (remainder, digest) = match reference.split_once('@') {
            Some((name, digest)) => {
                if !digest.contains(':') || digest.ends_with(':') {
                    return Err(invalid("digest must have the form algorithm:hex"));
                }
                (name, Some(digest.to_string()))
            }
            None => (reference, None),
        };

        let last_slash = remainder.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (name, tag) = match remainder[last_slash..].rfind(':') {
            Some(i) => {
                let split = last_slash + i;
                let tag = &remainder[split + 1..];
                if tag.is_empty() {
                    return Err(invalid("tag is empty"));
                }
                (&remainder[..split], Some(tag.to_string()))
            }
            None => (remainder, None),
        };

        let (registry, repository) = match name.split_once('/') {
            Some((host, rest)) if Self::looks_like_registry(host) => (host, rest.to_string()),
            _ => (DEFAULT_REGISTRY, name.to_string()),
        };
        let registry = if registry == DOCKER_HUB_ALIAS {
            DEFAULT_REGISTRY
        } else {
            registry
        };

        if repository.is_empty() || repository.split('/').any(str::is_empty) {
            return Err(invalid("repository path has an empty component"));
        }
        if repository.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(invalid("repository must be lower-case"));
        }

        let repository = if registry == DEFAULT_REGISTRY && !repository.contains('/') {
            format!("{}{}", OFFICIAL_REPOSITORY_PREFIX, repository)
        } else {
            repository
        };

        Ok(Self {
            registry: registry.to_string(),
            repository,
            tag,
            digest,
        })
    }

    fn looks_like_registry(host: &str) -> bool {
        host.contains('.') || host.contains(':') || host == "localhost"
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    /// Repository path without the registry host, e.g. `library/nginx`
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Digest declared in the reference itself, e.g. `sha256:abc...`
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Fully-qualified name without tag or digest, e.g. `index.docker.io/library/nginx`
    pub fn name(&self) -> String {
        format!("{}/{}", self.registry, self.repository)
    }

    /// Tag if present, otherwise the declared digest, otherwise `latest`
    pub fn version(&self) -> &str {
        self.tag
            .as_deref()
            .or(self.digest.as_deref())
            .unwrap_or(DEFAULT_TAG)
    }
}

/// Extracts the hex part of a `sha256:` digest from a runtime image id
/// such as `docker-pullable://nginx@sha256:abc...`.
pub fn sha256_from_image_id(image_id: &str) -> Option<&str> {
    image_id
        .split_once("sha256:")
        .map(|(_, hex)| hex)
        .filter(|hex| !hex.is_empty())
}
