use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a drifted cluster
/// and a run that could not complete at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - inventory written, or comparison found no errors
    Success = 0,
    /// Comparison found attribute mismatches between expected and actual
    DriftDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (cluster connection, discovery, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::DriftDetected => write!(f, "Drift Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for inventory generation and comparison.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping a user-facing hint attached to every failure class.
#[derive(Debug, Error)]
pub enum CodexError {
    #[error("Failed to connect to the cluster\nDetails: {details}\n\n💡 Hint: Check your kubeconfig, the selected context, and that the API server is reachable")]
    ClusterConnection { details: String },

    #[error("Failed to discover API resources\nDetails: {details}\n\n💡 Hint: Verify that your credentials allow discovery of the cluster's API groups")]
    ResourceDiscovery { details: String },

    #[error("Failed to list pods in namespace '{namespace}'\nDetails: {details}\n\n💡 Hint: Check that your credentials allow listing pods in this namespace")]
    PodListing { namespace: String, details: String },

    #[error("Invalid filter configuration: {path}\nDetails: {details}\n\n💡 Hint: Filters use the keys 'non-namespaced-inclusions' and 'namespaced-inclusions'")]
    FilterConfig { path: PathBuf, details: String },

    #[error("Failed to parse inventory document: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file is a CycloneDX JSON document produced by cluster-codex")]
    InventoryParse { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid output path: '{path}'\nReason: {reason}\n\n💡 Hint: Use a plain file name with an extension, such as 'kbom.json'")]
    InvalidOutputPath { path: String, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Collection was cancelled: {reason}\n\n💡 Hint: No inventory was written. Increase --timeout or re-run the command")]
    Cancelled { reason: String },

    /// Validation error for domain invariants
    #[error("Validation error: {message}")]
    Validation { message: String },
}
