use crate::shared::error::CodexError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of an inventory document accepted for comparison (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Characters that are rejected in output file names
const INVALID_OUTPUT_CHARS: &[char] = &['|', '<', '>', '?', '*', ':', '\\'];

/// Validates that an existing path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// A path that does not exist yet passes.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
///
/// # Errors
/// Returns an error if the path is a symbolic link or its metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for {} operation on {}: {}",
                operation,
                path.display(),
                e
            )
        }
    };

    if metadata.is_symlink() {
        return Err(CodexError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} target is a symbolic link", operation),
            hint: "Symbolic links are not followed. Point to the real file instead".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "expected inventory")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| CodexError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(CodexError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed. Point to the real file instead".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds `max_size`
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates the user-supplied name of the inventory output file.
///
/// The path must be non-empty, free of shell and reserved characters,
/// and carry a file extension.
pub fn validate_output_path(path: &str) -> Result<()> {
    let invalid = |reason: &str| -> anyhow::Error {
        CodexError::InvalidOutputPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if path.trim().is_empty() {
        return Err(invalid("output path is empty"));
    }

    if path.contains(INVALID_OUTPUT_CHARS) {
        return Err(invalid("output path contains invalid characters (| < > ? * : \\)"));
    }

    let has_extension = Path::new(path)
        .extension()
        .map(|ext| !ext.is_empty())
        .unwrap_or(false);
    if !has_extension {
        return Err(invalid("output path must include a file extension"));
    }

    Ok(())
}
