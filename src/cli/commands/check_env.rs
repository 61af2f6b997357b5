//! Check-env command implementation.
//!
//! The `pincheck check-env` command verifies that every dependency declared
//! in the env files is installed in a conda environment. It gates CI, so a
//! missing package exits with status 1.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::cli::args::CheckEnvArgs;
use crate::compare::missing;
use crate::config::PincheckConfig;
use crate::error::{PincheckError, Result};
use crate::installed::{conda_list, read_listing};
use crate::manifest::discover_files;
use crate::report::{PresenceReport, Report};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_env_sources;

/// The check-env command implementation.
pub struct CheckEnvCommand {
    repo_root: PathBuf,
    env_name: String,
    env_glob: String,
    installed_json: Option<PathBuf>,
}

impl CheckEnvCommand {
    /// Create a new check-env command.
    pub fn new(repo_root: &Path, config: &PincheckConfig, args: CheckEnvArgs) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            env_name: args.env.unwrap_or_else(|| config.conda.env_name.clone()),
            env_glob: args.glob.unwrap_or_else(|| config.python.env_glob.clone()),
            installed_json: args.installed_json.map(|path| {
                if path == Path::new("-") {
                    path
                } else {
                    repo_root.join(path)
                }
            }),
        }
    }
}

impl Command for CheckEnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let files = discover_files(&self.repo_root, &self.env_glob)?;
        if files.is_empty() {
            let err = PincheckError::NoFilesMatched {
                pattern: self.env_glob.clone(),
                root: self.repo_root.clone(),
            };
            ui.error(&err.to_string());
            return Ok(CommandResult::failure(2));
        }

        let sources = load_env_sources(&files, ui);
        let required = sources.union();

        let installed = match &self.installed_json {
            Some(path) => read_listing(path)?,
            None => conda_list(&self.env_name)?,
        };
        let installed: BTreeSet<String> = installed.into_keys().collect();

        let missing = missing(&required, &installed);
        let report = PresenceReport {
            env_name: self.env_name.clone(),
            env_files: files.iter().map(|f| f.display().to_string()).collect(),
            env_label: self.env_glob.clone(),
            required_total: required.len(),
            installed_total: installed.len(),
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
