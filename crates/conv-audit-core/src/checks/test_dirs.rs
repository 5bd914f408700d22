//! Test-presence check: directories named exactly `test` or `tests`.

use crate::report::TestReport;
use crate::walker::{last_segment, slash_path, Snapshot};

const TEST_DIR_NAMES: &[&str] = &["test", "tests"];

pub(crate) fn check(snapshot: &Snapshot) -> TestReport {
    let test_dirs: Vec<String> = snapshot
        .dirs()
        .iter()
        .filter(|dir| last_segment(dir).is_some_and(|name| TEST_DIR_NAMES.contains(&name)))
        .map(|dir| slash_path(dir))
        .collect();

    TestReport {
        root: snapshot.root().to_string_lossy().into_owned(),
        has_test_dir: !test_dirs.is_empty(),
        test_dirs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_test_and_tests_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/test/java")).unwrap();
        fs::create_dir_all(tmp.path().join("tests")).unwrap();
        fs::create_dir_all(tmp.path().join("testing")).unwrap();

        let report = check(&Snapshot::take(tmp.path()));

        assert!(report.has_test_dir);
        assert_eq!(report.test_dirs, vec!["src/test", "tests"]);
    }

    #[test]
    fn no_test_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/main")).unwrap();
        fs::write(tmp.path().join("src/main/test"), "a file, not a dir").unwrap();

        let report = check(&Snapshot::take(tmp.path()));

        assert!(!report.has_test_dir);
        assert!(report.test_dirs.is_empty());
    }
}
