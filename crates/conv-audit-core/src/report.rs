//! Report types returned by the checks.
//!
//! Each check has its own report shape. All reports carry the resolved `root`
//! and serialize directly with serde; field names are part of the output
//! contract.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::checks::CheckKind;

/// Architectural layer recognised by directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// `controller` directories.
    Controller,
    /// `service` directories.
    Service,
    /// `repository` directories.
    Repository,
}

impl Layer {
    /// All layers, in report order.
    pub const ALL: [Self; 3] = [Self::Controller, Self::Service, Self::Repository];

    /// Directory name that marks this layer.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Repository => "repository",
        }
    }

    /// Layer whose directory name is exactly `segment`.
    #[must_use]
    pub fn from_dir_name(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.dir_name() == segment)
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.dir_name())
    }
}

/// Result of the structure check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureReport {
    /// Resolved root directory.
    pub root: String,
    /// Whether at least one directory of each layer exists.
    pub layers: BTreeMap<Layer, bool>,
    /// Relative directory paths per layer.
    pub layer_paths: BTreeMap<Layer, Vec<String>>,
}

/// Result of the dependency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    /// Resolved root directory.
    pub root: String,
    /// The forbidden names that were searched for.
    pub forbidden_libs: Vec<String>,
    /// Relative paths of files containing each forbidden name, keyed in the
    /// order the names were given.
    pub violations: IndexMap<String, Vec<String>>,
}

/// A suspected secret found by the secret scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMatch {
    /// Relative path of the file.
    pub file: String,
    /// Matched text, truncated and suffixed with `...` when too long.
    #[serde(rename = "match")]
    pub snippet: String,
    /// Name of the pattern that matched.
    pub pattern: String,
}

/// Result of the secret scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretReport {
    /// Resolved root directory.
    pub root: String,
    /// Relative paths of environment files.
    pub env_files: Vec<String>,
    /// Pattern matches, in file then pattern order.
    pub suspected_secrets: Vec<SecretMatch>,
}

/// Result of the test-presence check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    /// Resolved root directory.
    pub root: String,
    /// True iff `test_dirs` is non-empty.
    pub has_test_dir: bool,
    /// Relative paths of directories named `test` or `tests`.
    pub test_dirs: Vec<String>,
}

/// Result of the API-convention check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReport {
    /// Resolved root directory.
    pub root: String,
    /// Files under a `controller` directory.
    pub controller_files: Vec<String>,
    /// Controller files that look like they return raw types.
    pub possible_raw_responses: Vec<String>,
}

/// Result of the architecture-boundary check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryReport {
    /// Resolved root directory.
    pub root: String,
    /// Controller files mentioning `Repository`.
    pub controller_direct_repository_usages: Vec<String>,
}

/// Any check's report. Serializes as the bare inner report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// See [`StructureReport`].
    Structure(StructureReport),
    /// See [`DependencyReport`].
    Dependencies(DependencyReport),
    /// See [`SecretReport`].
    Secrets(SecretReport),
    /// See [`TestReport`].
    Tests(TestReport),
    /// See [`ApiReport`].
    Api(ApiReport),
    /// See [`BoundaryReport`].
    Boundaries(BoundaryReport),
}

impl Report {
    /// The check that produced this report.
    #[must_use]
    pub fn kind(&self) -> CheckKind {
        match self {
            Self::Structure(_) => CheckKind::Structure,
            Self::Dependencies(_) => CheckKind::Dependencies,
            Self::Secrets(_) => CheckKind::Secrets,
            Self::Tests(_) => CheckKind::Tests,
            Self::Api(_) => CheckKind::Api,
            Self::Boundaries(_) => CheckKind::Boundaries,
        }
    }

    /// Resolved root directory.
    #[must_use]
    pub fn root(&self) -> &str {
        match self {
            Self::Structure(r) => &r.root,
            Self::Dependencies(r) => &r.root,
            Self::Secrets(r) => &r.root,
            Self::Tests(r) => &r.root,
            Self::Api(r) => &r.root,
            Self::Boundaries(r) => &r.root,
        }
    }

    /// True if the report contains something worth acting on.
    ///
    /// For structure and tests this means something is *missing*: no layer
    /// directory at all, or no test directory.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        match self {
            Self::Structure(r) => !r.layers.values().any(|present| *present),
            Self::Dependencies(r) => r.violations.values().any(|files| !files.is_empty()),
            Self::Secrets(r) => !r.env_files.is_empty() || !r.suspected_secrets.is_empty(),
            Self::Tests(r) => !r.has_test_dir,
            Self::Api(r) => !r.possible_raw_responses.is_empty(),
            Self::Boundaries(r) => !r.controller_direct_repository_usages.is_empty(),
        }
    }
}

/// All six reports for one root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Resolved root directory.
    pub root: String,
    /// Structure check.
    pub structure: StructureReport,
    /// Dependency check.
    pub dependencies: DependencyReport,
    /// Secret scan.
    pub secrets: SecretReport,
    /// Test-presence check.
    pub tests: TestReport,
    /// API-convention check.
    pub api: ApiReport,
    /// Architecture-boundary check.
    pub boundaries: BoundaryReport,
}

impl AuditSummary {
    /// The six reports wrapped as [`Report`]s, in check order.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        vec![
            Report::Structure(self.structure.clone()),
            Report::Dependencies(self.dependencies.clone()),
            Report::Secrets(self.secrets.clone()),
            Report::Tests(self.tests.clone()),
            Report::Api(self.api.clone()),
            Report::Boundaries(self.boundaries.clone()),
        ]
    }

    /// True if any report has findings.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.reports().iter().any(Report::has_findings)
    }
}
