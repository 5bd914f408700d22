//! Error taxonomy for audit operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while resolving a source or running a check.
///
/// Resolution errors (`InvalidArgument`, `NotFound`, `NotADirectory`,
/// `CloneFailure`) abort the whole check. `UnreadableFile` is only ever
/// produced per file and is absorbed by the checks, which skip the file and
/// carry on.
#[derive(Debug, Error, Diagnostic)]
pub enum AuditError {
    /// Neither a local path nor a remote URL was supplied.
    #[error("Either a local path or a remote URL must be specified")]
    #[diagnostic(
        code(conv_audit::invalid_argument),
        help("pass a directory path, or a git URL with --remote")
    )]
    InvalidArgument,

    /// The local path does not exist.
    #[error("Path not found: {}", path.display())]
    #[diagnostic(code(conv_audit::not_found))]
    NotFound {
        /// Absolute form of the path that was looked up.
        path: PathBuf,
    },

    /// The local path exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    #[diagnostic(code(conv_audit::not_a_directory))]
    NotADirectory {
        /// Absolute form of the offending path.
        path: PathBuf,
    },

    /// The external `git clone` process failed.
    #[error("Failed to clone {url}: {reason}")]
    #[diagnostic(
        code(conv_audit::clone_failure),
        help("check that the URL is reachable and that `git` is on PATH")
    )]
    CloneFailure {
        /// Remote repository URL.
        url: String,
        /// Exit status or spawn error, plus captured stderr.
        reason: String,
    },

    /// A single file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(conv_audit::unreadable_file))]
    UnreadableFile {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// IO error outside of per-file reads (temp dir creation, directory walk).
    #[error("IO error: {0}")]
    #[diagnostic(code(conv_audit::io))]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(conv_audit::config))]
    Config(#[from] ConfigError),
}

impl AuditError {
    /// Returns true for errors raised while resolving the scan target.
    #[must_use]
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument
                | Self::NotFound { .. }
                | Self::NotADirectory { .. }
                | Self::CloneFailure { .. }
        )
    }
}
