//! Shallow `git clone` runner.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::AuditError;

/// Clones `url` into `dest` with `--depth 1`.
///
/// `dest` must exist and be empty. The clone is awaited to completion with no
/// timeout; interactive credential prompts are disabled so a private URL fails
/// instead of blocking.
pub(crate) fn shallow_clone(url: &str, dest: &Path) -> Result<(), AuditError> {
    debug!("Cloning {} into {}", url, dest.display());

    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet", "--", url])
        .arg(dest)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| AuditError::CloneFailure {
            url: url.to_string(),
            reason: format!("failed to execute git: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AuditError::CloneFailure {
            url: url.to_string(),
            reason: format!("git clone exited with {}: {}", output.status, stderr.trim()),
        });
    }

    Ok(())
}
