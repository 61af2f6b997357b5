//! Error types for pincheck operations.
//!
//! This module defines [`PincheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Missing inputs and unreadable files surface once as a `PincheckError`
//!   and end the run with exit code 1
//! - Malformed manifests and unreachable recipes are logged and absorbed by
//!   the caller; they never abort a run on their own
//! - Use `anyhow::Error` (via `PincheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pincheck operations.
#[derive(Debug, Error)]
pub enum PincheckError {
    /// A required input file does not exist.
    #[error("{path} not found")]
    InputNotFound { path: PathBuf },

    /// No manifest files matched the expected pattern.
    #[error("No files matched {pattern} under {root}")]
    NoFilesMatched { pattern: String, root: PathBuf },

    /// An env file glob is not a valid pattern.
    #[error("Invalid glob {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A manifest could not be parsed.
    #[error("Error parsing {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// A remote recipe could not be fetched.
    #[error("Could not fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// The installed-package listing could not be produced or read.
    #[error("Failed to list installed packages: {message}")]
    CondaList { message: String },

    /// Failed to parse the pincheck configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pincheck operations.
pub type Result<T> = std::result::Result<T, PincheckError>;
