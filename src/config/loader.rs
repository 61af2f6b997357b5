//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::PincheckConfig;
use crate::error::{PincheckError, Result};

/// File name looked up in the repo root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".pincheck.yml";

/// Find the config file for a repo root.
pub fn find_config(repo_root: &Path) -> Option<PathBuf> {
    let path = repo_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Parse a single config file.
pub fn load_config_file(path: &Path) -> Result<PincheckConfig> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(PincheckConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|e| PincheckError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the effective configuration.
///
/// An explicit path must exist. Without one, `.pincheck.yml` in the repo
/// root is used when present, otherwise the built-in defaults.
pub fn load_config(repo_root: &Path, explicit: Option<&Path>) -> Result<PincheckConfig> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(PincheckError::InputNotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_config(repo_root),
    };

    match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(PincheckConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, PincheckConfig::default());
    }

    #[test]
    fn discovers_repo_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "conda:\n  env_name: analysis\n",
        )
        .unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.conda.env_name, "analysis");
    }

    #[test]
    fn empty_config_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), PincheckConfig::default());
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(temp.path(), Some(&temp.path().join("custom.yml")));
        assert!(matches!(result, Err(PincheckError::InputNotFound { .. })));
    }

    #[test]
    fn invalid_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "python: [not, a, mapping]\n").unwrap();

        match load_config(temp.path(), Some(&path)) {
            Err(PincheckError::ConfigParse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ConfigParse, got {:?}", other),
        }
    }
}
