//! Configuration types for conv-audit.
//!
//! An [`AuditConfig`] is read once (from TOML or defaults) and handed to the
//! [`Auditor`](crate::Auditor), which never mutates it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default forbidden library list.
pub const DEFAULT_FORBIDDEN_LIBS: &[&str] = &["lombok"];

/// Extensions (without the dot) whose files the dependency check reads.
pub const DEFAULT_DEPENDENCY_EXTENSIONS: &[&str] =
    &["gradle", "kts", "xml", "java", "kt", "txt", "md", "py"];

/// Prefix reserved for temporary clone directories.
pub const DEFAULT_TEMP_PREFIX: &str = "conv-audit-";

/// Top-level configuration for conv-audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Library names the dependency check looks for when the caller gives none.
    #[serde(default = "default_forbidden_libs")]
    pub forbidden_libs: Vec<String>,

    /// File extensions the dependency check reads, compared case-insensitively.
    #[serde(default = "default_dependency_extensions")]
    pub dependency_extensions: Vec<String>,

    /// Name prefix of temporary clone directories. Cleanup refuses to delete
    /// anything whose name does not start with it.
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,

    /// Maximum number of characters of a secret match kept in a report.
    #[serde(default = "default_snippet_limit")]
    pub snippet_limit: usize,

    /// File name prefix marking environment files.
    #[serde(default = "default_env_file_prefix")]
    pub env_file_prefix: String,

    /// Wrapper type names whose presence clears a controller file in the
    /// API-convention check.
    #[serde(default = "default_response_wrappers")]
    pub response_wrappers: Vec<String>,

    /// Regexes appended after the built-in secret patterns.
    #[serde(default)]
    pub extra_secret_patterns: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            forbidden_libs: default_forbidden_libs(),
            dependency_extensions: default_dependency_extensions(),
            temp_prefix: default_temp_prefix(),
            snippet_limit: default_snippet_limit(),
            env_file_prefix: default_env_file_prefix(),
            response_wrappers: default_response_wrappers(),
            extra_secret_patterns: Vec::new(),
        }
    }
}

impl AuditConfig {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that TOML typing alone cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty temp prefix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temp_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                message: "temp_prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if `ext` (without the dot) is on the dependency allow-list.
    #[must_use]
    pub fn is_dependency_extension(&self, ext: &str) -> bool {
        self.dependency_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}

fn default_forbidden_libs() -> Vec<String> {
    DEFAULT_FORBIDDEN_LIBS.iter().map(|s| (*s).to_string()).collect()
}

fn default_dependency_extensions() -> Vec<String> {
    DEFAULT_DEPENDENCY_EXTENSIONS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_temp_prefix() -> String {
    DEFAULT_TEMP_PREFIX.to_string()
}

fn default_snippet_limit() -> usize {
    60
}

fn default_env_file_prefix() -> String {
    ".env".to_string()
}

fn default_response_wrappers() -> Vec<String> {
    vec!["ResponseEntity".to_string(), "ApiResponse".to_string()]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A value parsed but is not usable.
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },

    /// An extra secret pattern is not a valid regex.
    #[error("Invalid secret pattern `{pattern}`: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Regex compilation error.
        source: regex::Error,
    },
}
