//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Every path flag defaults to
//! the value from `.pincheck.yml`, which in turn defaults to the usual
//! repository layout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pincheck - Reconcile declared package manifests against a container image.
#[derive(Debug, Parser)]
#[command(name = "pincheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository root holding the manifests
    #[arg(short, long, global = true, default_value = ".")]
    pub repo_root: PathBuf,

    /// Path to config file (overrides default .pincheck.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print reports and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that every env file dependency is installed in a conda env
    CheckEnv(CheckEnvArgs),

    /// Check that every env file dependency is in the pinned manifest
    Validate(ValidateArgs),

    /// Rewrite the pinned manifest to the declared packages and validate it
    Filter(FilterArgs),

    /// Check that every R package is in the pinned R script
    ValidateR(ValidateRArgs),
}

/// Arguments for the `check-env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckEnvArgs {
    /// Conda environment to list
    #[arg(long)]
    pub env: Option<String>,

    /// Glob (within the repo root) selecting env files
    #[arg(long)]
    pub glob: Option<String>,

    /// Read `conda list --json` output from a file (relative to the repo root, '-' for stdin) instead of running conda
    #[arg(long, value_name = "PATH")]
    pub installed_json: Option<PathBuf>,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Glob (within the repo root) selecting env files
    #[arg(long)]
    pub glob: Option<String>,

    /// Pinned manifest to validate against
    #[arg(long, value_name = "FILE")]
    pub pinned: Option<PathBuf>,
}

/// Arguments for the `filter` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Glob (within the repo root) selecting env files
    #[arg(long)]
    pub glob: Option<String>,

    /// Pinned manifest to filter in place
    #[arg(long, value_name = "FILE")]
    pub pinned: Option<PathBuf>,

    /// Base environment file
    #[arg(long, value_name = "FILE")]
    pub base_env: Option<PathBuf>,

    /// Build log to write
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Use built-in feedstock dependency lists instead of fetching recipes
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `validate-r` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateRArgs {
    /// R install script
    #[arg(long, value_name = "FILE")]
    pub install_r: Option<PathBuf>,

    /// Pinned R script
    #[arg(long, value_name = "FILE")]
    pub pinned_r: Option<PathBuf>,

    /// Rocker geospatial script, relative to the repo root ('-' for stdin, the default)
    #[arg(long, value_name = "PATH")]
    pub geospatial: Option<PathBuf>,

    /// Build log to append to
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}
