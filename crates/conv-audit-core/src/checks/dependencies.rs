//! Forbidden-dependency check.
//!
//! Plain substring search: a file "uses" a library if its text contains the
//! library name anywhere, comments and prose included. Only files whose
//! extension is on the configured allow-list are read.

use indexmap::IndexMap;

use crate::config::AuditConfig;
use crate::report::DependencyReport;
use crate::walker::Snapshot;

use super::read_or_skip;

pub(crate) fn check(
    snapshot: &Snapshot,
    config: &AuditConfig,
    forbidden_libs: &[String],
) -> DependencyReport {
    let mut violations: IndexMap<String, Vec<String>> = forbidden_libs
        .iter()
        .map(|lib| (lib.clone(), Vec::new()))
        .collect();

    let candidates = snapshot.files().iter().filter(|entry| {
        entry
            .extension()
            .is_some_and(|ext| config.is_dependency_extension(ext))
    });

    for entry in candidates {
        let Some(text) = read_or_skip(entry) else {
            continue;
        };

        for (lib, files) in &mut violations {
            if text.contains(lib.as_str()) {
                files.push(entry.relative_str());
            }
        }
    }

    DependencyReport {
        root: snapshot.root().to_string_lossy().into_owned(),
        forbidden_libs: forbidden_libs.to_vec(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn libs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn only_allow_listed_extensions_are_searched() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("build.gradle"), "compileOnly 'org.projectlombok:lombok'").unwrap();
        fs::write(root.join("notes.md"), "we removed lombok last year").unwrap();
        fs::write(root.join("logo.png"), b"\x89PNGlombok").unwrap();
        fs::write(root.join("Makefile"), "lombok").unwrap();

        let report = check(
            &Snapshot::take(root),
            &AuditConfig::default(),
            &libs(&["lombok"]),
        );

        assert_eq!(report.violations["lombok"], vec!["build.gradle", "notes.md"]);
    }

    #[test]
    fn every_forbidden_name_has_an_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("requirements.txt"), "requests==2.0\n").unwrap();

        let report = check(
            &Snapshot::take(tmp.path()),
            &AuditConfig::default(),
            &libs(&["lombok", "requests"]),
        );

        assert!(report.violations["lombok"].is_empty());
        assert_eq!(report.violations["requests"], vec!["requirements.txt"]);
        assert_eq!(report.forbidden_libs, libs(&["lombok", "requests"]));
    }

    #[test]
    fn extension_match_ignores_case() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("docs/README.MD"), "uses lombok").unwrap();

        let report = check(
            &Snapshot::take(tmp.path()),
            &AuditConfig::default(),
            &libs(&["lombok"]),
        );

        assert_eq!(report.violations["lombok"], vec!["docs/README.MD"]);
    }

    #[test]
    fn violations_follow_given_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pom.xml"), "<alpha/>").unwrap();

        let report = check(
            &Snapshot::take(tmp.path()),
            &AuditConfig::default(),
            &libs(&["zeta", "alpha"]),
        );

        let keys: Vec<&str> = report.violations.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(report.violations["alpha"], vec!["pom.xml"]);
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a-removed.md"), "lombok").unwrap();
        fs::write(tmp.path().join("b.md"), "lombok").unwrap();

        let snapshot = Snapshot::take(tmp.path());
        fs::remove_file(tmp.path().join("a-removed.md")).unwrap();
        assert_eq!(snapshot.files().len(), 2);

        let report = check(&snapshot, &AuditConfig::default(), &libs(&["lombok"]));
        assert_eq!(report.violations["lombok"], vec!["b.md"]);
    }

    #[test]
    fn empty_list_yields_empty_violations() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("pom.xml"), "<lombok/>").unwrap();

        let report = check(&Snapshot::take(tmp.path()), &AuditConfig::default(), &[]);
        assert!(report.violations.is_empty());
    }
}
