//! Architecture-boundary check.
//!
//! Flags controller files that mention `Repository`, as candidates for a
//! controller depending on the persistence layer directly. The word may appear
//! in a comment or an unrelated identifier; callers get candidates, not proof.

use crate::report::BoundaryReport;
use crate::walker::{FileEntry, Snapshot};

use super::{read_or_skip, CONTROLLER_DIR};

const REPOSITORY_MARKER: &str = "Repository";

pub(crate) fn check(snapshot: &Snapshot) -> BoundaryReport {
    let controller_direct_repository_usages = snapshot
        .files()
        .iter()
        .filter(|entry| entry.in_directory(CONTROLLER_DIR))
        .filter(|entry| read_or_skip(entry).is_some_and(|text| text.contains(REPOSITORY_MARKER)))
        .map(FileEntry::relative_str)
        .collect();

    BoundaryReport {
        root: snapshot.root().to_string_lossy().into_owned(),
        controller_direct_repository_usages,
    }
}
