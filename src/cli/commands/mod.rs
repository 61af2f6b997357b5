//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command follows the same
//! pipeline: extract package sets, compare against a ground truth, report.

pub mod check_env;
pub mod dispatcher;
pub mod filter;
pub mod validate;
pub mod validate_r;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::{Path, PathBuf};

use crate::compare::Sources;
use crate::manifest::load_env_file;
use crate::ui::UserInterface;

/// Display name for a manifest: its file name, or the full path if it has none.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load every env file into labeled package sets.
pub(crate) fn load_env_sources(files: &[PathBuf], ui: &mut dyn UserInterface) -> Sources {
    let mut sources = Sources::new();
    for file in files {
        let packages = load_env_file(file);
        ui.detail(&format!("  {}: {} packages", file_label(file), packages.len()));
        sources.push(file_label(file), packages);
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_label_uses_file_name() {
        assert_eq!(file_label(Path::new("/repo/environment/env-geo.yml")), "env-geo.yml");
        assert_eq!(file_label(Path::new("/")), "/");
    }

    #[test]
    fn load_env_sources_labels_by_file_name() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("env-a.yml");
        let b = temp.path().join("env-b.yml");
        fs::write(&a, "dependencies: [numpy]\n").unwrap();
        fs::write(&b, "dependencies: [\n").unwrap();

        let mut ui = MockUI::new();
        let sources = load_env_sources(&[a, b], &mut ui);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources.sources_for("numpy"), vec!["env-a.yml"]);
        assert!(sources.get("env-b.yml").unwrap().is_empty());
        assert_eq!(ui.details().len(), 2);
    }
}
