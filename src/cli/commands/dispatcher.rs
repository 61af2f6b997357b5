//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, PincheckConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for progress output and reports
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Create a result for a validation that found missing packages but
    /// must not fail the job.
    pub fn reported_failure() -> Self {
        Self {
            success: false,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    repo_root: PathBuf,
    config: PincheckConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given repo root and configuration.
    pub fn new(repo_root: PathBuf, config: PincheckConfig) -> Self {
        Self { repo_root, config }
    }

    /// Create a dispatcher, loading configuration for the repo root.
    pub fn load(repo_root: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(&repo_root, config_path)?;
        Ok(Self::new(repo_root, config))
    }

    /// Get the repo root path.
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &PincheckConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::CheckEnv(args) => {
                let cmd = super::check_env::CheckEnvCommand::new(
                    &self.repo_root,
                    &self.config,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Validate(args) => {
                let cmd = super::validate::ValidateCommand::new(
                    &self.repo_root,
                    &self.config,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::Filter(args) => {
                let cmd =
                    super::filter::FilterCommand::new(&self.repo_root, &self.config, args.clone());
                cmd.execute(ui)
            }
            Commands::ValidateR(args) => {
                let cmd = super::validate_r::ValidateRCommand::new(
                    &self.repo_root,
                    &self.config,
                    args.clone(),
                );
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn reported_failure_exits_zero() {
        let result = CommandResult::reported_failure();
        assert!(!result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn dispatcher_loads_repo_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".pincheck.yml"), "conda:\n  env_name: analysis\n").unwrap();

        let dispatcher = CommandDispatcher::load(temp.path().to_path_buf(), None).unwrap();
        assert_eq!(dispatcher.repo_root(), temp.path());
        assert_eq!(dispatcher.config().conda.env_name, "analysis");
    }
}
