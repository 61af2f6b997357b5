//! Configuration loading.
//!
//! pincheck works without any configuration; the defaults describe the
//! usual repository layout. A `.pincheck.yml` in the repo root (or a file
//! passed with `--config`) overrides file names, the env glob, the conda
//! environment and the feedstock list. Command-line flags override both.
//!
//! # Example
//!
//! ```yaml
//! python:
//!   env_glob: environment/env-*.yml
//! feedstocks:
//!   packages: [pangeo-notebook, pangeo-dask]
//!   timeout_secs: 5
//! r:
//!   rocker_script: /rocker_scripts/install_geospatial.sh
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, CONFIG_FILE_NAME};
pub use schema::{CondaSettings, FeedstockSettings, PincheckConfig, PythonSettings, RSettings};
