//! API-convention check.
//!
//! A controller file is a "possible raw response" when it declares something
//! shaped like `public TypeName methodName(` and mentions none of the
//! configured response wrapper types. The signature pattern targets Java-style
//! method declarations and is applied to every file under a `controller`
//! directory regardless of language.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::AuditConfig;
use crate::report::ApiReport;
use crate::walker::Snapshot;

use super::{read_or_skip, CONTROLLER_DIR};

#[allow(clippy::expect_used)]
static PUBLIC_TYPED_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+[A-Z][A-Za-z0-9_<>]*\s+\w+\(").expect("signature pattern must compile")
});

pub(crate) fn check(snapshot: &Snapshot, config: &AuditConfig) -> ApiReport {
    let mut controller_files = Vec::new();
    let mut possible_raw_responses = Vec::new();

    for entry in snapshot.files() {
        if !entry.in_directory(CONTROLLER_DIR) {
            continue;
        }
        let rel = entry.relative_str();
        controller_files.push(rel.clone());

        let Some(text) = read_or_skip(entry) else {
            continue;
        };

        if looks_like_raw_response(&text, &config.response_wrappers) {
            possible_raw_responses.push(rel);
        }
    }

    ApiReport {
        root: snapshot.root().to_string_lossy().into_owned(),
        controller_files,
        possible_raw_responses,
    }
}

fn looks_like_raw_response(text: &str, wrappers: &[String]) -> bool {
    PUBLIC_TYPED_METHOD.is_match(text) && !wrappers.iter().any(|w| text.contains(w.as_str()))
}
