//! Filter file support for cluster-codex.
//!
//! A filter file selects which cluster-scoped kinds and which namespaced
//! kinds (per namespace) end up in the inventory. JSON, YAML and TOML are
//! accepted, chosen by file extension.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::inventory::domain::{Filter, NamespacedRule, NonNamespacedRule};
use crate::shared::error::CodexError;
use crate::shared::Result;

/// Filter file looked up in the working directory when none is given
pub const DEFAULT_FILTER_FILENAME: &str = "filters.json";

/// Top-level filter file schema.
#[derive(Debug, Deserialize, Default)]
pub struct FilterFile {
    #[serde(rename = "non-namespaced-inclusions", default)]
    pub non_namespaced_inclusions: Option<NonNamespacedInclusions>,
    #[serde(rename = "namespaced-inclusions", default)]
    pub namespaced_inclusions: Option<Vec<NamespacedInclusion>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Cluster-scoped kinds to include.
#[derive(Debug, Deserialize, Default)]
pub struct NonNamespacedInclusions {
    #[serde(default)]
    pub resources: Option<Vec<String>>,
}

/// Namespaced kinds to include within a set of namespaces.
#[derive(Debug, Deserialize, Default)]
pub struct NamespacedInclusion {
    #[serde(default)]
    pub namespaces: Option<Vec<String>>,
    #[serde(default)]
    pub resources: Option<Vec<String>>,
}

impl FilterFile {
    /// Builds the normalized filter. Missing and null lists mean "everything".
    pub fn into_filter(self) -> Filter {
        let non_namespaced = NonNamespacedRule::new(
            self.non_namespaced_inclusions
                .and_then(|n| n.resources)
                .unwrap_or_default(),
        );
        let rules = self
            .namespaced_inclusions
            .unwrap_or_default()
            .into_iter()
            .map(|rule| {
                NamespacedRule::new(
                    rule.namespaces.unwrap_or_default(),
                    rule.resources.unwrap_or_default(),
                )
            })
            .collect();
        Filter::new(non_namespaced, rules)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    fn parse(self, content: &str) -> Result<FilterFile> {
        let file = match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Yaml => {
                // An empty YAML document is an empty filter
                if content.trim().is_empty() {
                    FilterFile::default()
                } else {
                    serde_yaml_ng::from_str(content)?
                }
            }
            FileFormat::Toml => toml::from_str(content)?,
        };
        Ok(file)
    }
}

fn filter_error(path: &Path, details: impl Into<String>) -> anyhow::Error {
    CodexError::FilterConfig {
        path: path.to_path_buf(),
        details: details.into(),
    }
    .into()
}

/// Load a filter from an explicit path. Returns an error if the file is not found.
pub fn load_filter_from_path(path: &Path) -> Result<Filter> {
    let format = FileFormat::from_path(path).ok_or_else(|| {
        filter_error(
            path,
            "unsupported file extension, expected .json, .yaml, .yml or .toml",
        )
    })?;

    let content = std::fs::read_to_string(path)
        .map_err(|e| filter_error(path, format!("Failed to read filter file: {}", e)))?;

    let file = format
        .parse(&content)
        .map_err(|e| filter_error(path, format!("Failed to parse filter file: {:#}", e)))?;

    warn_unknown_fields(&file);
    debug!(path = %path.display(), "loaded filter file");
    Ok(file.into_filter())
}

/// Resolve the filter for a run.
///
/// An explicit path must exist. Without one, `filters.json` in the working
/// directory is used when present, and everything is included otherwise.
pub fn load_filter(path: Option<&Path>) -> Result<Filter> {
    match path {
        Some(path) => load_filter_from_path(path),
        None => discover_filter(Path::new(".")),
    }
}

/// Look for the default filter file in a directory.
pub fn discover_filter(dir: &Path) -> Result<Filter> {
    let path = dir.join(DEFAULT_FILTER_FILENAME);
    if !path.exists() {
        debug!(path = %path.display(), "no filter file found, including everything");
        return Ok(Filter::include_all());
    }
    load_filter_from_path(&path)
}

/// Warn about unknown fields in the filter file.
fn warn_unknown_fields(file: &FilterFile) {
    for key in file.unknown_fields.keys() {
        warn!(field = %key, "unknown filter field will be ignored");
    }
}
