//! Installed package listing.
//!
//! The ground truth for `check-env` is the JSON output of
//! `conda list -n <env> --json`, either produced here or captured from the
//! container by the CI job and handed over as a file or on stdin.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::error::{PincheckError, Result};
use crate::manifest::normalize_name;

/// Installed packages keyed by normalized name, valued by version.
pub type InstalledPackages = BTreeMap<String, String>;

#[derive(Debug, Deserialize)]
struct CondaRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Parse `conda list --json` output.
///
/// Records without a name are skipped.
pub fn parse_conda_list_json(content: &str) -> Result<InstalledPackages> {
    let records: Vec<CondaRecord> =
        serde_json::from_str(content).map_err(|e| PincheckError::CondaList {
            message: format!("invalid conda list JSON: {}", e),
        })?;

    Ok(records
        .into_iter()
        .filter_map(|rec| {
            let name = rec.name.filter(|n| !n.trim().is_empty())?;
            Some((normalize_name(&name), rec.version.unwrap_or_default()))
        })
        .collect())
}

/// Run `conda list -n <env> --json` and parse its output.
pub fn conda_list(env: &str) -> Result<InstalledPackages> {
    tracing::debug!("Running conda list -n {} --json", env);
    let output = Command::new("conda")
        .args(["list", "-n", env, "--json"])
        .output()
        .map_err(|e| PincheckError::CondaList {
            message: format!("could not run conda: {}", e),
        })?;

    if !output.status.success() {
        return Err(PincheckError::CondaList {
            message: format!(
                "conda exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    parse_conda_list_json(&String::from_utf8_lossy(&output.stdout))
}

/// Read a saved listing from `path`, or from stdin when `path` is `-`.
pub fn read_listing(path: &Path) -> Result<InstalledPackages> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !path.exists() {
            return Err(PincheckError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        std::fs::read_to_string(path)?
    };
    parse_conda_list_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LISTING: &str = r#"[
  {"base_url": "https://conda.anaconda.org/conda-forge", "build_number": 0,
   "build_string": "py311h64a7726_0", "channel": "conda-forge",
   "dist_name": "numpy-1.26.0-py311h64a7726_0", "name": "numpy",
   "platform": "linux-64", "version": "1.26.0"},
  {"name": "Jupyter_Server", "version": "2.14.0"},
  {"name": "earthaccess", "version": "0.9.0", "channel": "pypi"},
  {"version": "0.0.1"},
  {"name": "", "version": "1"}
]"#;

    #[test]
    fn parses_names_and_versions() {
        let installed = parse_conda_list_json(LISTING).unwrap();
        assert_eq!(installed.len(), 3);
        assert_eq!(installed.get("numpy"), Some(&"1.26.0".to_string()));
        assert!(installed.contains_key("jupyter-server"));
        assert!(installed.contains_key("earthaccess"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = parse_conda_list_json("not json");
        assert!(matches!(result, Err(PincheckError::CondaList { .. })));
    }

    #[test]
    fn read_listing_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conda-list.json");
        std::fs::write(&path, LISTING).unwrap();
        assert_eq!(read_listing(&path).unwrap().len(), 3);
    }

    #[test]
    fn read_listing_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = read_listing(&temp.path().join("nope.json"));
        assert!(matches!(result, Err(PincheckError::InputNotFound { .. })));
    }
}
