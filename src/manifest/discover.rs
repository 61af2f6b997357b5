//! Manifest file discovery.
//!
//! Env files are selected with a glob relative to the repo root. Directory
//! wildcards and `**` work the same way they do in the final component, so
//! `env-*.yml`, `environment/env-*.yml`, `*/env-*.yml` and `**/env-*.yml`
//! are all valid.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{PincheckError, Result};

/// Find files under `root` matching `pattern`, sorted by path.
///
/// Directories that match are skipped. A pattern whose directories do not
/// exist yields an empty list rather than an error.
pub fn discover_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = Path::new(&Pattern::escape(&root.to_string_lossy())).join(pattern);
    let full = full.to_string_lossy();

    let entries = glob::glob(&full).map_err(|e| PincheckError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(glob::GlobError::into_error)?;
        if path.is_file() {
            files.push(path);
        }
    }

    tracing::debug!("{} matched {} files under {}", pattern, files.len(), root.display());
    files.sort();
    Ok(files)
}
