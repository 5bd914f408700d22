//! # conv-audit-core
//!
//! Heuristic convention and architecture checks for a repository.
//!
//! Given a local directory or a git URL, an [`Auditor`] walks the file tree
//! and runs one of six checks:
//!
//! - structure: `controller` / `service` / `repository` directories
//! - dependencies: forbidden library names in build, config and source files
//! - secrets: `.env` files and strings that look like credentials
//! - tests: `test` / `tests` directories
//! - API conventions: controllers returning raw types instead of a wrapper
//! - architecture boundaries: controllers mentioning `Repository`
//!
//! All checks are textual pattern matching over file names and contents. They
//! do not parse source code and report candidates, not verdicts.
//!
//! ## Example
//!
//! ```no_run
//! use conv_audit_core::{AuditConfig, Auditor, Source};
//!
//! let auditor = Auditor::new(AuditConfig::default())?;
//! let report = auditor.check_architecture_boundaries(&Source::local("./my-service"))?;
//! for file in &report.controller_direct_repository_usages {
//!     println!("{file}");
//! }
//! # Ok::<(), conv_audit_core::AuditError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checks;
mod clone;
mod config;
mod error;
mod patterns;
mod report;
mod source;
mod walker;

pub use checks::{Auditor, AuditorBuilder, CheckKind, UnknownCheck};
pub use config::{
    AuditConfig, ConfigError, DEFAULT_DEPENDENCY_EXTENSIONS, DEFAULT_FORBIDDEN_LIBS,
    DEFAULT_TEMP_PREFIX,
};
pub use error::AuditError;
pub use patterns::{builtin_patterns, SecretPattern};
pub use report::{
    ApiReport, AuditSummary, BoundaryReport, DependencyReport, Layer, Report, SecretMatch,
    SecretReport, StructureReport, TestReport,
};
pub use source::{cleanup, resolve, AnalysisRoot, ScopedRoot, Source};
pub use walker::{walk, walk_dirs, FileEntry, Snapshot, VCS_DIR};
