//! Conda environment YAML extraction.
//!
//! Only the `dependencies` key is read. Plain string entries and the string
//! entries of a nested `pip:` mapping both go through [`extract_name`]; the
//! `pip:` key itself never names a package.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

use super::name::extract_name;
use crate::error::{PincheckError, Result};

/// Parse the package names declared in a conda environment file.
pub fn parse_env_yaml(content: &str) -> std::result::Result<BTreeSet<String>, serde_yaml::Error> {
    let doc: Value = serde_yaml::from_str(content)?;
    let mut packages = BTreeSet::new();

    let Some(deps) = doc.get("dependencies").and_then(Value::as_sequence) else {
        return Ok(packages);
    };

    for dep in deps {
        match dep {
            Value::String(spec) => insert_spec(&mut packages, spec),
            Value::Mapping(map) => {
                if let Some(pip_deps) = map.get("pip").and_then(Value::as_sequence) {
                    for spec in pip_deps.iter().filter_map(Value::as_str) {
                        insert_spec(&mut packages, spec);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(packages)
}

fn insert_spec(packages: &mut BTreeSet<String>, spec: &str) {
    let name = extract_name(spec);
    if !name.is_empty() {
        packages.insert(name);
    }
}

/// Read and parse one env file.
///
/// A missing file is an error; malformed YAML is reported as
/// [`PincheckError::ManifestParse`] so callers can decide to absorb it.
pub fn read_env_file(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        return Err(PincheckError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_env_yaml(&content).map_err(|e| PincheckError::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load one env file, treating any failure as an empty contribution.
pub fn load_env_file(path: &Path) -> BTreeSet<String> {
    match read_env_file(path) {
        Ok(packages) => {
            tracing::debug!("{}: {} packages", path.display(), packages.len());
            packages
        }
        Err(e) => {
            tracing::warn!("{}", e);
            BTreeSet::new()
        }
    }
}
