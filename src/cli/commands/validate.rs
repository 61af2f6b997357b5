//! Validate command implementation.
//!
//! The `pincheck validate` command checks that every package declared in
//! the env files appears in the pinned manifest. It is meant for gating and
//! exits with status 1 when anything is missing.

use std::path::{Path, PathBuf};

use crate::cli::args::ValidateArgs;
use crate::compare::missing;
use crate::config::PincheckConfig;
use crate::error::Result;
use crate::manifest::{discover_files, PinnedManifest};
use crate::report::{PinnedValidationReport, Report};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{file_label, load_env_sources};

/// The validate command implementation.
pub struct ValidateCommand {
    repo_root: PathBuf,
    env_glob: String,
    pinned_file: PathBuf,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(repo_root: &Path, config: &PincheckConfig, args: ValidateArgs) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            env_glob: args.glob.unwrap_or_else(|| config.python.env_glob.clone()),
            pinned_file: repo_root.join(args.pinned.unwrap_or_else(|| config.python.pinned_file.clone())),
        }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.pinned_file.exists() {
            ui.error(&format!("{} not found", self.pinned_file.display()));
            return Ok(CommandResult::failure(1));
        }

        ui.message(&format!("Parsing {} files...", self.env_glob));
        let files = discover_files(&self.repo_root, &self.env_glob)?;
        if files.is_empty() {
            ui.warning(&format!("No {} files found", self.env_glob));
            return Ok(CommandResult::success());
        }

        let sources = load_env_sources(&files, ui);
        ui.message(&format!("Found {} env files", sources.len()));

        let pinned_label = file_label(&self.pinned_file);
        ui.message(&format!("Parsing {}...", pinned_label));
        let pinned = PinnedManifest::load(&self.pinned_file)?;
        ui.message(&format!("Found {} pinned packages", pinned.len()));

        let required = sources.union();
        ui.message(&format!(
            "Total unique packages in env files: {}",
            required.len()
        ));

        let missing = missing(&required, &pinned.names());
        let report = PinnedValidationReport {
            env_label: self.env_glob.clone(),
            pinned_label,
            missing: sources.attribute(&missing),
        };
        ui.report(&report.render());

        if report.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
