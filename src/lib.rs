//! Pincheck - package manifest consistency checks for container images.
//!
//! Pincheck compares the packages an image declares (conda environment
//! files, a base environment, R install scripts) against what was actually
//! pinned or installed, and writes human-readable reports for CI logs.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface, argument parsing and commands
//! - [`config`] - Optional `.pincheck.yml` configuration
//! - [`manifest`] - Package name extraction from each manifest format
//! - [`compare`] - Set differences and source attribution
//! - [`feedstock`] - Conda-forge recipe fetching with offline fallback
//! - [`base_env`] - Base environment expansion into feedstock groups
//! - [`installed`] - `conda list --json` listings
//! - [`report`] - Plain-text report rendering
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use pincheck::compare::{missing, Sources};
//! use pincheck::manifest::{extract, ManifestFormat, PinnedManifest};
//!
//! let env = extract("dependencies:\n  - numpy>=1.26\n  - scipy\n", ManifestFormat::CondaYaml);
//! let pinned = PinnedManifest::parse("numpy=1.26.4=py312_0\n");
//!
//! let mut sources = Sources::new();
//! sources.push("env-science.yml", env);
//!
//! let gaps = missing(&sources.union(), &pinned.names());
//! let attributed = sources.attribute(&gaps);
//! assert_eq!(attributed["scipy"], vec!["env-science.yml".to_string()]);
//! ```

pub mod base_env;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod feedstock;
pub mod installed;
pub mod manifest;
pub mod report;
pub mod ui;

pub use error::{PincheckError, Result};
