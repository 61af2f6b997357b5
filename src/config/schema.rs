//! Configuration schema definitions for pincheck.
//!
//! This module contains the struct definitions that map to the optional
//! `.pincheck.yml` file. Every field has a default matching the layout the
//! CI jobs use, so an empty or absent file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::feedstock::DEFAULT_RECIPE_URL;

/// Root configuration structure for `.pincheck.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PincheckConfig {
    /// Python (conda) manifest settings
    pub python: PythonSettings,

    /// Installed-package listing settings
    pub conda: CondaSettings,

    /// Feedstock resolution settings
    pub feedstocks: FeedstockSettings,

    /// R manifest settings
    pub r: RSettings,
}

/// Paths and labels for the Python manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonSettings {
    /// Glob selecting env files, relative to the repo root
    pub env_glob: String,

    /// Pinned manifest, relative to the repo root
    pub pinned_file: PathBuf,

    /// Base environment file, relative to the repo root
    pub base_env_file: PathBuf,

    /// Display name of the base environment
    pub base_label: String,

    /// Base environment entries that are not tracked as packages
    pub base_exclude: Vec<String>,

    /// Build log written by `filter`
    pub log_file: PathBuf,
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            env_glob: "env-*.yml".to_string(),
            pinned_file: PathBuf::from("packages-python-pinned.yaml"),
            base_env_file: PathBuf::from("base-environment.yaml"),
            base_label: "py-rocket-base".to_string(),
            base_exclude: vec!["python".to_string(), "pip".to_string()],
            log_file: PathBuf::from("build.log"),
        }
    }
}

/// Settings for `conda list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondaSettings {
    /// Environment passed to `conda list -n`
    pub env_name: String,
}

impl Default for CondaSettings {
    fn default() -> Self {
        Self {
            env_name: "notebook".to_string(),
        }
    }
}

/// Feedstock meta-packages and how to fetch their recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedstockSettings {
    /// Meta-packages expanded through their feedstock, in section order
    pub packages: Vec<String>,

    /// Recipe URL; `{name}` is replaced by the meta-package name
    pub recipe_url: String,

    /// Fetch timeout in seconds
    pub timeout_secs: u64,

    /// Skip the network and use the built-in dependency lists
    pub offline: bool,
}

impl Default for FeedstockSettings {
    fn default() -> Self {
        Self {
            packages: vec!["pangeo-notebook".to_string(), "pangeo-dask".to_string()],
            recipe_url: DEFAULT_RECIPE_URL.to_string(),
            timeout_secs: 10,
            offline: false,
        }
    }
}

/// Paths and labels for the R manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RSettings {
    /// R install script, relative to the repo root
    pub install_script: PathBuf,

    /// Pinned R script, relative to the repo root
    pub pinned_file: PathBuf,

    /// Path of the rocker script inside the container, for display
    pub rocker_script: String,

    /// Build log the R report is appended to
    pub log_file: PathBuf,
}

impl Default for RSettings {
    fn default() -> Self {
        Self {
            install_script: PathBuf::from("install.R"),
            pinned_file: PathBuf::from("packages-r-pinned.R"),
            rocker_script: "/rocker_scripts/install_geospatial.sh".to_string(),
            log_file: PathBuf::from("build.log"),
        }
    }
}
