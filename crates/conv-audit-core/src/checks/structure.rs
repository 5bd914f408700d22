//! Layered-structure check.
//!
//! Looks for directories literally named `controller`, `service` or
//! `repository`. Only the last segment counts, so `a/controller/dto` is not
//! itself a controller directory. No file contents are read.

use std::collections::BTreeMap;

use crate::report::{Layer, StructureReport};
use crate::walker::{last_segment, slash_path, Snapshot};

pub(crate) fn check(snapshot: &Snapshot) -> StructureReport {
    let mut layer_paths: BTreeMap<Layer, Vec<String>> =
        Layer::ALL.into_iter().map(|l| (l, Vec::new())).collect();

    for dir in snapshot.dirs() {
        if let Some(layer) = last_segment(dir).and_then(Layer::from_dir_name) {
            layer_paths.entry(layer).or_default().push(slash_path(dir));
        }
    }

    let layers = layer_paths
        .iter()
        .map(|(layer, paths)| (*layer, !paths.is_empty()))
        .collect();

    StructureReport {
        root: snapshot.root().to_string_lossy().into_owned(),
        layers,
        layer_paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_layer_directories_at_any_depth() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/main/java/app/controller/dto")).unwrap();
        fs::create_dir_all(root.join("src/main/java/app/service")).unwrap();
        fs::create_dir_all(root.join("legacy/controller")).unwrap();

        let report = check(&Snapshot::take(root));

        assert!(report.layers[&Layer::Controller]);
        assert!(report.layers[&Layer::Service]);
        assert!(!report.layers[&Layer::Repository]);
        assert_eq!(
            report.layer_paths[&Layer::Controller],
            vec!["legacy/controller", "src/main/java/app/controller"]
        );
        assert_eq!(
            report.layer_paths[&Layer::Service],
            vec!["src/main/java/app/service"]
        );
        assert!(report.layer_paths[&Layer::Repository].is_empty());
    }

    #[test]
    fn files_named_like_layers_do_not_count() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("controller"), "not a dir").unwrap();
        fs::create_dir(tmp.path().join("Service")).unwrap();

        let report = check(&Snapshot::take(tmp.path()));
        assert!(report.layers.values().all(|present| !present));
    }

    #[test]
    fn layer_directories_inside_git_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git/repository")).unwrap();

        let report = check(&Snapshot::take(tmp.path()));
        assert!(!report.layers[&Layer::Repository]);
    }
}
