//! Manifest extraction.
//!
//! Every manifest format reduces to a set of package names:
//!
//! - [`conda`] - conda environment YAML (`dependencies`, nested `pip:`)
//! - [`pinned`] - `name=version=build` exports, parsed and rewritten
//! - [`rscript`] - `install.R` vectors and pinned R install calls
//! - [`shell`] - rocker `install2.r` scripts
//! - [`discover`] - glob selection of env files
//! - [`name`] - normalization shared by the conda-style formats

pub mod conda;
pub mod discover;
pub mod name;
pub mod pinned;
pub mod rscript;
pub mod shell;

pub use conda::{load_env_file, parse_env_yaml, read_env_file};
pub use discover::discover_files;
pub use name::{extract_name, normalize_name};
pub use pinned::{PinnedManifest, Section};
pub use rscript::{parse_install_r, parse_pinned_r};
pub use shell::parse_install_script;

/// Supported manifest formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Conda environment YAML.
    CondaYaml,
    /// `name=version=build` pinned export.
    PinnedYaml,
    /// R install script.
    RScript,
    /// Shell install script.
    ShellScript,
}

/// Extract package names from raw manifest text.
///
/// Malformed conda YAML is logged and contributes nothing.
pub fn extract(content: &str, format: ManifestFormat) -> std::collections::BTreeSet<String> {
    match format {
        ManifestFormat::CondaYaml => parse_env_yaml(content).unwrap_or_else(|e| {
            tracing::warn!("Error parsing environment YAML: {}", e);
            Default::default()
        }),
        ManifestFormat::PinnedYaml => PinnedManifest::parse(content).names(),
        ManifestFormat::RScript => parse_install_r(content),
        ManifestFormat::ShellScript => parse_install_script(content),
    }
}
