//! Source resolution and temporary-clone cleanup.
//!
//! A [`Source`] names what to scan: a local directory or a remote repository
//! URL. Resolving it yields an [`AnalysisRoot`]; roots created by cloning are
//! *ephemeral* and are deleted by [`cleanup`] once the check is done.
//! [`ScopedRoot`] ties the two together so every exit path releases the clone.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::clone::shallow_clone;
use crate::config::AuditConfig;
use crate::error::AuditError;

/// Location of the code base to audit.
///
/// `local_path` takes precedence: when both fields are set the remote URL is
/// ignored. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    /// Existing directory on the local filesystem.
    pub local_path: Option<PathBuf>,
    /// Repository URL understood by `git clone`.
    pub remote_url: Option<String>,
}

impl Source {
    /// Creates a source pointing at a local directory.
    #[must_use]
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: Some(path.into()),
            remote_url: None,
        }
    }

    /// Creates a source pointing at a remote repository.
    #[must_use]
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            local_path: None,
            remote_url: Some(url.into()),
        }
    }

    fn usable_local_path(&self) -> Option<&Path> {
        self.local_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    fn usable_remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// A resolved directory to scan.
#[derive(Debug, PartialEq, Eq)]
pub struct AnalysisRoot {
    path: PathBuf,
    ephemeral: bool,
}

impl AnalysisRoot {
    pub(crate) fn caller_owned(path: PathBuf) -> Self {
        Self {
            path,
            ephemeral: false,
        }
    }

    pub(crate) fn cloned(path: PathBuf) -> Self {
        Self {
            path,
            ephemeral: true,
        }
    }

    /// Absolute path of the root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the root was created by cloning and must be deleted after use.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Root path as a display string, used in reports.
    #[must_use]
    pub fn display_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Resolves `source` into a concrete directory.
///
/// # Errors
///
/// - [`AuditError::InvalidArgument`] if neither location is usable.
/// - [`AuditError::NotFound`] / [`AuditError::NotADirectory`] for a bad local path.
/// - [`AuditError::CloneFailure`] if `git clone` fails. The temporary
///   directory is removed before the error is returned.
pub fn resolve(source: &Source, config: &AuditConfig) -> Result<AnalysisRoot, AuditError> {
    if let Some(local) = source.usable_local_path() {
        if source.usable_remote_url().is_some() {
            debug!("Both local path and remote URL given; using the local path");
        }
        return resolve_local(local);
    }

    let Some(url) = source.usable_remote_url() else {
        return Err(AuditError::InvalidArgument);
    };

    let tmp = tempfile::Builder::new()
        .prefix(&config.temp_prefix)
        .tempdir()?;
    // On failure `tmp` is dropped here, which removes the empty directory.
    shallow_clone(url, tmp.path())?;

    Ok(AnalysisRoot::cloned(tmp.keep()))
}

fn resolve_local(path: &Path) -> Result<AnalysisRoot, AuditError> {
    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };

    if !absolute.exists() {
        return Err(AuditError::NotFound { path: absolute });
    }
    if !absolute.is_dir() {
        return Err(AuditError::NotADirectory { path: absolute });
    }

    let canonical = absolute.canonicalize()?;
    Ok(AnalysisRoot::caller_owned(canonical))
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match home::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Releases `root` if it is an ephemeral clone.
///
/// Caller-owned roots are never touched. An ephemeral root is only removed if
/// its directory name still carries `temp_prefix` and it still exists. Removal
/// errors are logged and swallowed.
pub fn cleanup(root: AnalysisRoot, temp_prefix: &str) {
    if !root.ephemeral {
        return;
    }

    let has_prefix = root
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(temp_prefix));

    if !has_prefix {
        warn!(
            "Refusing to delete {}: name lacks prefix {temp_prefix:?}",
            root.path.display()
        );
        return;
    }
    if !root.path.exists() {
        return;
    }

    match std::fs::remove_dir_all(&root.path) {
        Ok(()) => debug!("Removed temporary clone {}", root.path.display()),
        Err(e) => warn!(
            "Failed to remove temporary clone {}: {e}",
            root.path.display()
        ),
    }
}

/// An [`AnalysisRoot`] that is cleaned up when dropped.
///
/// Dropping runs [`cleanup`] exactly once, whether the work done with the root
/// returned normally, returned an error, or panicked.
#[derive(Debug)]
pub struct ScopedRoot {
    root: AnalysisRoot,
    temp_prefix: String,
}

impl ScopedRoot {
    /// Resolves `source` and takes ownership of the resulting root.
    ///
    /// # Errors
    ///
    /// Propagates any [`resolve`] error.
    pub fn acquire(source: &Source, config: &AuditConfig) -> Result<Self, AuditError> {
        let root = resolve(source, config)?;
        Ok(Self::new(root, &config.temp_prefix))
    }

    /// Wraps an already resolved root.
    #[must_use]
    pub fn new(root: AnalysisRoot, temp_prefix: &str) -> Self {
        Self {
            root,
            temp_prefix: temp_prefix.to_string(),
        }
    }

    /// The held root.
    #[must_use]
    pub fn root(&self) -> &AnalysisRoot {
        &self.root
    }
}

impl Drop for ScopedRoot {
    fn drop(&mut self) {
        // The placeholder is caller-owned, so nothing can release it again.
        let root = std::mem::replace(&mut self.root, AnalysisRoot::caller_owned(PathBuf::new()));
        cleanup(root, &self.temp_prefix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn neither_location_is_invalid_argument() {
        let err = resolve(&Source::default(), &AuditConfig::default()).unwrap_err();
        assert!(matches!(err, AuditError::InvalidArgument));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let source = Source {
            local_path: Some(PathBuf::new()),
            remote_url: Some("  ".to_string()),
        };
        let err = resolve(&source, &AuditConfig::default()).unwrap_err();
        assert!(matches!(err, AuditError::InvalidArgument));
    }

    #[test]
    fn missing_local_path_is_not_found_and_not_created() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");

        let err = resolve(&Source::local(&missing), &AuditConfig::default()).unwrap_err();
        assert!(matches!(err, AuditError::NotFound { ref path } if path == &missing));
        assert!(!missing.exists());
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let err = resolve(&Source::local(&file), &AuditConfig::default()).unwrap_err();
        assert!(matches!(err, AuditError::NotADirectory { .. }));
    }

    #[test]
    fn local_path_wins_over_remote() {
        let tmp = TempDir::new().unwrap();
        let source = Source {
            local_path: Some(tmp.path().to_path_buf()),
            remote_url: Some("https://invalid.example/repo.git".to_string()),
        };

        let root = resolve(&source, &AuditConfig::default()).unwrap();
        assert!(!root.is_ephemeral());
        assert_eq!(root.path(), tmp.path().canonicalize().unwrap());
    }

    #[test]
    fn cleanup_never_deletes_caller_owned_root() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("conv-audit-owned");
        fs::create_dir(&dir).unwrap();

        cleanup(AnalysisRoot::caller_owned(dir.clone()), "conv-audit-");
        assert!(dir.exists());
    }

    #[test]
    fn cleanup_requires_prefix() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("someone-elses-data");
        fs::create_dir(&dir).unwrap();

        cleanup(AnalysisRoot::cloned(dir.clone()), "conv-audit-");
        assert!(dir.exists());
    }

    #[test]
    fn cleanup_removes_prefixed_ephemeral_root() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("conv-audit-abc123");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/file.txt"), "data").unwrap();

        cleanup(AnalysisRoot::cloned(dir.clone()), "conv-audit-");
        assert!(!dir.exists());
    }

    #[test]
    fn cleanup_of_vanished_root_is_silent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("conv-audit-gone");
        cleanup(AnalysisRoot::cloned(dir), "conv-audit-");
    }

    #[test]
    fn scoped_root_cleans_up_on_panic() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("conv-audit-scoped");
        fs::create_dir(&dir).unwrap();

        let guard_dir = dir.clone();
        let outcome = std::panic::catch_unwind(move || {
            let scoped = ScopedRoot::new(AnalysisRoot::cloned(guard_dir), "conv-audit-");
            assert!(scoped.root().path().exists());
            panic!("analysis blew up");
        });

        assert!(outcome.is_err());
        assert!(!dir.exists());
    }
}
