//! Secret scan.
//!
//! Flags environment files by name and runs every secret pattern over every
//! readable file. Matches are truncated before they reach the report so a full
//! credential is never echoed back.

use crate::config::AuditConfig;
use crate::patterns::SecretPattern;
use crate::report::{SecretMatch, SecretReport};
use crate::walker::Snapshot;

use super::read_or_skip;

const ELLIPSIS: &str = "...";

pub(crate) fn check<'p>(
    snapshot: &Snapshot,
    config: &AuditConfig,
    patterns: impl Iterator<Item = &'p SecretPattern> + Clone,
) -> SecretReport {
    let mut env_files = Vec::new();
    let mut suspected_secrets = Vec::new();

    for entry in snapshot.files() {
        let rel = entry.relative_str();

        if entry
            .file_name()
            .is_some_and(|name| name.starts_with(config.env_file_prefix.as_str()))
        {
            env_files.push(rel.clone());
        }

        let Some(text) = read_or_skip(entry) else {
            continue;
        };

        for pattern in patterns.clone() {
            for found in pattern.find_all(&text) {
                suspected_secrets.push(SecretMatch {
                    file: rel.clone(),
                    snippet: truncate_snippet(found, config.snippet_limit),
                    pattern: pattern.name().to_string(),
                });
            }
        }
    }

    SecretReport {
        root: snapshot.root().to_string_lossy().into_owned(),
        env_files,
        suspected_secrets,
    }
}

/// Keeps the first `limit` characters of `text`, appending `...` if anything
/// was cut.
pub(crate) fn truncate_snippet(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
