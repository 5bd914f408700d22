//! File tree enumeration.
//!
//! Walks everything under a root except version-control metadata. Siblings
//! are visited in file-name order so reports are reproducible.
//!
//! Symlinks are not followed. A link that does not point at a directory is
//! listed as a file, dangling links included; reading one fails and the
//! checks skip its content.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::AuditError;

/// Directory name excluded from every walk, at any depth.
pub const VCS_DIR: &str = ".git";

/// A file (or non-directory symlink) found under the analysis root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    relative: PathBuf,
    absolute: PathBuf,
}

impl FileEntry {
    /// Creates an entry for `absolute`, which must live under `root`.
    #[must_use]
    pub fn new(root: &Path, absolute: PathBuf) -> Self {
        let relative = absolute
            .strip_prefix(root)
            .map_or_else(|_| absolute.clone(), Path::to_path_buf);
        Self { relative, absolute }
    }

    /// Path relative to the analysis root.
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Absolute path, used for reading.
    #[must_use]
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Relative path with `/` separators, as it appears in reports.
    #[must_use]
    pub fn relative_str(&self) -> String {
        slash_path(&self.relative)
    }

    /// Final path component.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.relative.file_name().and_then(|n| n.to_str())
    }

    /// Extension without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.relative.extension().and_then(|e| e.to_str())
    }

    /// True if any directory between the root and this file is named `name`.
    #[must_use]
    pub fn in_directory(&self, name: &str) -> bool {
        self.relative
            .parent()
            .is_some_and(|parent| has_segment(parent, name))
    }

    /// Reads the file as text, dropping bytes that are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::UnreadableFile`] if the file cannot be read.
    pub fn read_text(&self) -> Result<String, AuditError> {
        let bytes = std::fs::read(&self.absolute).map_err(|e| AuditError::UnreadableFile {
            path: self.relative.clone(),
            source: e,
        })?;
        Ok(decode_ignoring_invalid(&bytes))
    }
}

/// Every file and directory found under one root, collected in a single pass.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root: PathBuf,
    files: Vec<FileEntry>,
    dirs: Vec<PathBuf>,
}

impl Snapshot {
    /// Walks `root` once, collecting files and directories.
    #[must_use]
    pub fn take(root: &Path) -> Self {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in entries(root) {
            if entry.file_type().is_dir() {
                dirs.push(relative_to(root, entry.path()));
            } else if is_file_like(&entry) {
                files.push(FileEntry::new(root, entry.into_path()));
            }
        }

        debug!(
            "Walked {}: {} files, {} directories",
            root.display(),
            files.len(),
            dirs.len()
        );

        Self {
            root: root.to_path_buf(),
            files,
            dirs,
        }
    }

    /// The walked root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All files, in walk order.
    #[must_use]
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// All directories below the root (the root itself excluded), relative to it.
    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Lists every file under `root`, skipping [`VCS_DIR`] subtrees.
#[must_use]
pub fn walk(root: &Path) -> Vec<FileEntry> {
    entries(root)
        .filter(is_file_like)
        .map(|entry| FileEntry::new(root, entry.into_path()))
        .collect()
}

/// Lists every directory under `root` (excluding `root`), relative to it.
#[must_use]
pub fn walk_dirs(root: &Path) -> Vec<PathBuf> {
    entries(root)
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| relative_to(root, entry.path()))
        .collect()
}

/// Joins path components with `/`.
#[must_use]
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Last component of `path`, if it is a normal UTF-8 name.
#[must_use]
pub fn last_segment(path: &Path) -> Option<&str> {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_str(),
        _ => None,
    }
}

fn has_segment(path: &Path, name: &str) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(s) if s == name))
}

fn entries(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_vcs_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                None
            }
        })
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == VCS_DIR
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/controller")).unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("vendor/.git")).unwrap();
        fs::write(root.join("README.md"), "readme").unwrap();
        fs::write(root.join("src/controller/Api.java"), "class Api {}").unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join(".git/objects/ab"), "obj").unwrap();
        fs::write(root.join("vendor/.git/config"), "cfg").unwrap();
        fs::write(root.join("vendor/lib.py"), "x = 1").unwrap();
        tmp
    }

    #[test]
    fn walk_skips_vcs_directories_at_any_depth() {
        let tmp = fixture();
        let files: Vec<String> = walk(tmp.path()).iter().map(FileEntry::relative_str).collect();

        assert_eq!(
            files,
            vec!["README.md", "src/controller/Api.java", "vendor/lib.py"]
        );
    }

    #[test]
    fn walk_dirs_excludes_root_and_vcs() {
        let tmp = fixture();
        let dirs: Vec<String> = walk_dirs(tmp.path()).iter().map(|d| slash_path(d)).collect();

        assert_eq!(dirs, vec!["src", "src/controller", "vendor"]);
    }

    #[test]
    fn snapshot_matches_individual_walks() {
        let tmp = fixture();
        let snapshot = Snapshot::take(tmp.path());

        assert_eq!(snapshot.files(), walk(tmp.path()).as_slice());
        assert_eq!(snapshot.dirs(), walk_dirs(tmp.path()).as_slice());
    }

    #[test]
    fn file_entry_paths() {
        let root = Path::new("/repo");
        let entry = FileEntry::new(root, PathBuf::from("/repo/a/controller/X.java"));

        assert_eq!(entry.relative(), Path::new("a/controller/X.java"));
        assert_eq!(entry.absolute(), Path::new("/repo/a/controller/X.java"));
        assert_eq!(entry.file_name(), Some("X.java"));
        assert_eq!(entry.extension(), Some("java"));
        assert!(entry.in_directory("controller"));
        assert!(entry.in_directory("a"));
        assert!(!entry.in_directory("X.java"));
        assert!(!entry.in_directory("control"));
    }

    #[test]
    fn read_text_drops_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mixed.bin");
        fs::write(&path, b"lom\xff\xfebok").unwrap();

        let entry = FileEntry::new(tmp.path(), path);
        assert_eq!(entry.read_text().unwrap(), "lombok");
    }

    #[test]
    fn read_text_missing_file_is_unreadable() {
        let entry = FileEntry::new(Path::new("/nowhere"), PathBuf::from("/nowhere/gone.txt"));
        assert!(matches!(
            entry.read_text(),
            Err(AuditError::UnreadableFile { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_listed_as_file() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join(".env.prod"))
            .unwrap();
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("self-link")).unwrap();

        let snapshot = Snapshot::take(tmp.path());
        let files: Vec<String> = snapshot.files().iter().map(FileEntry::relative_str).collect();
        assert_eq!(files, vec![".env.prod"]);
        assert!(snapshot.files()[0].read_text().is_err());
    }

    #[test]
    fn last_segment_of_relative_dir() {
        assert_eq!(last_segment(Path::new("a/b/controller")), Some("controller"));
        assert_eq!(last_segment(Path::new("tests")), Some("tests"));
    }
}
