//! Package-URL identifiers for inventory entries.
//!
//! Applications are encoded as `pkg:k8s/{kind}/{name}?apiVersion=..[&namespace=..]`
//! and images as `pkg:oci/{repository}[@sha256:{digest}]?repository_url=..&version=..`.
//! Query parameters are always emitted in a fixed order and percent-encoded,
//! so encoding the same input twice yields byte-identical strings.

use super::image_reference::ImageReference;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches ECR registry hosts, which embed a 12-digit account id and a region.
/// The host must start the value or follow a separator, so longer digit runs never match.
static ECR_REGISTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\w.-])\d{12}\.dkr\.ecr\.[a-z0-9-]+\.amazonaws\.com")
        .expect("ECR registry pattern is valid")
});

/// Keeps the captured separator and wildcards the host
const ECR_WILDCARD: &str = "${1}*";

/// Query-parameter layout used for image identifiers
///
/// Both sides of a comparison must be produced with the same scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagePurlScheme {
    /// `repository_url` and `version` only
    #[default]
    Versioned,
    /// `repository_url` and `version`, then `ownerRef` and `namespace` when present
    Scoped,
}

impl FromStr for ImagePurlScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "versioned" => Ok(ImagePurlScheme::Versioned),
            "scoped" => Ok(ImagePurlScheme::Scoped),
            _ => Err(format!(
                "Invalid image purl scheme: {}. Please specify 'versioned' or 'scoped'",
                s
            )),
        }
    }
}

impl fmt::Display for ImagePurlScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImagePurlScheme::Versioned => f.write_str("versioned"),
            ImagePurlScheme::Scoped => f.write_str("scoped"),
        }
    }
}

/// Identifier of a cluster object.
pub fn application_identifier(kind: &str, name: &str, namespace: &str, api_version: &str) -> String {
    let mut purl = format!(
        "pkg:k8s/{}/{}?apiVersion={}",
        urlencoding::encode(kind),
        urlencoding::encode(name),
        urlencoding::encode(api_version)
    );
    if !namespace.is_empty() {
        purl.push_str("&namespace=");
        purl.push_str(&urlencoding::encode(namespace));
    }
    purl
}

/// Where an image instance was observed, for schemes that encode it
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageScope<'a> {
    pub owner: Option<&'a str>,
    pub namespace: Option<&'a str>,
}

/// Identifier of a container image.
///
/// `digest` is the hex part of a `sha256:` digest.
pub fn image_identifier(
    scheme: ImagePurlScheme,
    image: &ImageReference,
    digest: Option<&str>,
    scope: ImageScope<'_>,
) -> String {
    let mut purl = format!("pkg:oci/{}", image.repository());
    if let Some(digest) = digest.filter(|d| !d.is_empty()) {
        purl.push_str("@sha256:");
        purl.push_str(digest);
    }

    let mut params = vec![
        ("repository_url", image.name()),
        ("version", image.version().to_string()),
    ];
    if scheme == ImagePurlScheme::Scoped {
        if let Some(owner) = scope.owner.filter(|o| !o.is_empty()) {
            params.push(("ownerRef", owner.to_string()));
        }
        if let Some(namespace) = scope.namespace.filter(|n| !n.is_empty()) {
            params.push(("namespace", namespace.to_string()));
        }
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", purl, query)
}

/// Replaces ECR registry hosts with `*` so identifiers from different
/// accounts and regions compare equal.
pub fn normalize_registry(value: &str) -> Cow<'_, str> {
    ECR_REGISTRY.replace_all(value, ECR_WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(reference: &str) -> ImageReference {
        ImageReference::parse(reference).unwrap()
    }

    #[test]
    fn test_application_identifier_namespaced() {
        let purl = application_identifier("Deployment", "nginx-deployment", "clx-test", "apps/v1");
        assert_eq!(
            purl,
            "pkg:k8s/Deployment/nginx-deployment?apiVersion=apps%2Fv1&namespace=clx-test"
        );
    }

    #[test]
    fn test_application_identifier_cluster_scoped() {
        let purl = application_identifier("ClusterRole", "system:aggregate-to-view", "", "rbac.authorization.k8s.io/v1");
        assert_eq!(
            purl,
            "pkg:k8s/ClusterRole/system%3Aaggregate-to-view?apiVersion=rbac.authorization.k8s.io%2Fv1"
        );
    }

    #[test]
    fn test_application_identifier_is_stable() {
        let a = application_identifier("Service", "api", "web", "v1");
        let b = application_identifier("Service", "api", "web", "v1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_image_identifier_versioned() {
        let purl = image_identifier(
            ImagePurlScheme::Versioned,
            &image("nginx:1.25"),
            Some("abc123"),
            ImageScope {
                owner: Some("Deployment/web"),
                namespace: Some("default"),
            },
        );
        assert_eq!(
            purl,
            "pkg:oci/library/nginx@sha256:abc123?repository_url=index.docker.io%2Flibrary%2Fnginx&version=1.25"
        );
    }

    #[test]
    fn test_image_identifier_scoped_appends_owner_and_namespace() {
        let purl = image_identifier(
            ImagePurlScheme::Scoped,
            &image("registry.k8s.io/etcd:3.5.7-0"),
            None,
            ImageScope {
                owner: Some("Node/control-plane"),
                namespace: Some("kube-system"),
            },
        );
        assert_eq!(
            purl,
            "pkg:oci/etcd?repository_url=registry.k8s.io%2Fetcd&version=3.5.7-0&ownerRef=Node%2Fcontrol-plane&namespace=kube-system"
        );
    }

    #[test]
    fn test_image_identifier_scoped_omits_absent_scope() {
        let purl = image_identifier(
            ImagePurlScheme::Scoped,
            &image("registry.k8s.io/pause:3.9"),
            None,
            ImageScope::default(),
        );
        assert_eq!(
            purl,
            "pkg:oci/pause?repository_url=registry.k8s.io%2Fpause&version=3.9"
        );
    }

    #[test]
    fn test_image_identifier_distinguishes_digests() {
        let reference = image("nginx:1.25");
        let a = image_identifier(ImagePurlScheme::Versioned, &reference, Some("aaa"), ImageScope::default());
        let b = image_identifier(ImagePurlScheme::Versioned, &reference, Some("bbb"), ImageScope::default());
        assert_ne!(a, b);
    }

    #[test]
    fn test_normalize_registry_ecr_accounts_match() {
        let a = normalize_registry("111111111111.dkr.ecr.us-west-2.amazonaws.com/team/app");
        let b = normalize_registry("222222222222.dkr.ecr.us-east-1.amazonaws.com/team/app");
        assert_eq!(a, "*/team/app");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_registry_leaves_other_hosts() {
        assert_eq!(normalize_registry("quay.io/team/app"), "quay.io/team/app");
        assert_eq!(
            normalize_registry("1234.dkr.ecr.us-west-2.amazonaws.com/app"),
            "1234.dkr.ecr.us-west-2.amazonaws.com/app"
        );
    }

    #[test]
    fn test_normalize_registry_requires_host_boundary() {
        let thirteen_digits = "9123456789012.dkr.ecr.us-west-2.amazonaws.com/app";
        assert_eq!(normalize_registry(thirteen_digits), thirteen_digits);

        let prefixed = "mirror-111111111111.dkr.ecr.us-west-2.amazonaws.com/app";
        assert_eq!(normalize_registry(prefixed), prefixed);
    }

    #[test]
    fn test_normalize_registry_inside_values() {
        assert_eq!(
            normalize_registry("pkg:oci/app@sha256:ab?x=111111111111.dkr.ecr.eu-west-1.amazonaws.com/app"),
            "pkg:oci/app@sha256:ab?x=*/app"
        );
        assert_eq!(
            normalize_registry(
                "111111111111.dkr.ecr.us-west-2.amazonaws.com/a,222222222222.dkr.ecr.us-east-1.amazonaws.com/b"
            ),
            "*/a,*/b"
        );
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!(ImagePurlScheme::from_str("Scoped").unwrap(), ImagePurlScheme::Scoped);
        assert_eq!(ImagePurlScheme::from_str("versioned").unwrap(), ImagePurlScheme::Versioned);
        assert!(ImagePurlScheme::from_str("legacy").is_err());
        assert_eq!(ImagePurlScheme::default().to_string(), "versioned");
    }
}
