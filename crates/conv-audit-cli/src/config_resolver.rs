//! Locating and loading the configuration for a scan.
//!
//! The first match wins:
//!
//! 1. the file passed with `--config`
//! 2. `conv-audit.toml` or `.conv-audit.toml` in the scanned directory
//! 3. `config.toml` in `$CONV_AUDIT_CONFIG_DIR`, or in `~/.conv-audit/`
//! 4. built-in defaults
//!
//! A remote-only scan has no local directory, so step 2 is skipped. The
//! working directory is never consulted on its behalf.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use conv_audit_core::AuditConfig;

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["conv-audit.toml", ".conv-audit.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const GLOBAL_DIR_ENV: &str = "CONV_AUDIT_CONFIG_DIR";
const GLOBAL_DIR_NAME: &str = ".conv-audit";

/// Where a scan's configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the scanned directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Config file to read, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration, or returns defaults for [`ConfigSource::Default`].
    pub fn load(&self) -> Result<AuditConfig> {
        let Some(path) = self.path() else {
            return Ok(AuditConfig::default());
        };

        match self {
            Self::Global(_) => tracing::info!("Using global config: {}", path.display()),
            _ => tracing::debug!("Using config: {}", path.display()),
        }

        AuditConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Picks the configuration for a scan of `scan_dir`.
///
/// `scan_dir` is `None` when only a remote URL is scanned.
#[must_use]
pub fn resolve(explicit: Option<&Path>, scan_dir: Option<&Path>) -> ConfigSource {
    locate(explicit, scan_dir, global_config_dir().as_deref())
}

fn locate(
    explicit: Option<&Path>,
    scan_dir: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project = scan_dir.and_then(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });
    if let Some(path) = project {
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Global config directory: `$CONV_AUDIT_CONFIG_DIR`, else `~/.conv-audit/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(GLOBAL_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => home::home_dir().map(|h| h.join(GLOBAL_DIR_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_beats_project_config() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("conv-audit.toml"), "").unwrap();

        let found = locate(Some(&explicit), Some(tmp.path()), None);
        assert_eq!(found, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn project_config_beats_global() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let global = tmp.path().join("global");
        fs::create_dir(&project).unwrap();
        fs::create_dir(&global).unwrap();
        fs::write(project.join(".conv-audit.toml"), "").unwrap();
        fs::write(global.join("config.toml"), "").unwrap();

        let found = locate(None, Some(&project), Some(&global));
        assert_eq!(found, ConfigSource::Project(project.join(".conv-audit.toml")));
    }

    #[test]
    fn visible_project_name_checked_first() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("conv-audit.toml"), "").unwrap();
        fs::write(tmp.path().join(".conv-audit.toml"), "").unwrap();

        let found = locate(None, Some(tmp.path()), None);
        assert_eq!(found, ConfigSource::Project(tmp.path().join("conv-audit.toml")));
    }

    #[test]
    fn remote_scan_skips_project_lookup() {
        let tmp = TempDir::new().unwrap();
        let cwd_like = tmp.path().join("workdir");
        let global = tmp.path().join("global");
        fs::create_dir(&cwd_like).unwrap();
        fs::create_dir(&global).unwrap();
        fs::write(cwd_like.join("conv-audit.toml"), "forbidden_libs = [\"x\"]").unwrap();
        fs::write(global.join("config.toml"), "").unwrap();

        assert_eq!(
            locate(None, None, Some(&global)),
            ConfigSource::Global(global.join("config.toml"))
        );
        assert_eq!(locate(None, None, None), ConfigSource::Default);
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("conv-audit.toml")).unwrap();

        assert_eq!(locate(None, Some(tmp.path()), None), ConfigSource::Default);
    }

    #[test]
    fn load_reads_project_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conv-audit.toml");
        fs::write(&path, "forbidden_libs = [\"guava\"]\nsnippet_limit = 10\n").unwrap();

        let config = ConfigSource::Project(path).load().unwrap();
        assert_eq!(config.forbidden_libs, vec!["guava"]);
        assert_eq!(config.snippet_limit, 10);
    }

    #[test]
    fn load_defaults_and_reports_bad_files() {
        assert_eq!(ConfigSource::Default.load().unwrap(), AuditConfig::default());

        let tmp = TempDir::new().unwrap();
        let missing = ConfigSource::Explicit(tmp.path().join("nope.toml"));
        let err = missing.load().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
