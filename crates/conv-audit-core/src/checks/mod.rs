//! The six heuristic checks and the [`Auditor`] that runs them.
//!
//! Every check follows the same shape: resolve the source, walk the tree,
//! analyze, and release a temporary clone on the way out. The resolve/release
//! half lives in one place, `Auditor::with_snapshot`, so individual checks
//! only see a [`Snapshot`].

mod api;
mod boundaries;
mod dependencies;
mod secrets;
mod structure;
mod test_dirs;

use std::str::FromStr;

use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::patterns::{builtin_patterns, SecretPattern};
use crate::report::{
    ApiReport, AuditSummary, BoundaryReport, DependencyReport, Report, SecretReport,
    StructureReport, TestReport,
};
use crate::source::{ScopedRoot, Source};
use crate::walker::{FileEntry, Snapshot};

/// Directory name that marks controller code for the API and boundary checks.
pub(crate) const CONTROLLER_DIR: &str = "controller";

/// Reads `entry`, logging and returning `None` if it cannot be read.
pub(crate) fn read_or_skip(entry: &FileEntry) -> Option<String> {
    match entry.read_text() {
        Ok(text) => Some(text),
        Err(e) => {
            debug!("Skipping {}: {e}", entry.relative().display());
            None
        }
    }
}

/// Identifies one of the six checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckKind {
    /// Layer directories (`controller`, `service`, `repository`).
    Structure,
    /// Forbidden library names in build, config and source files.
    Dependencies,
    /// Environment files and secret-looking strings.
    Secrets,
    /// `test` / `tests` directories.
    Tests,
    /// Controllers returning raw types instead of a response wrapper.
    Api,
    /// Controllers referring to repositories.
    Boundaries,
}

impl CheckKind {
    /// All checks, in report order.
    pub const ALL: [Self; 6] = [
        Self::Structure,
        Self::Dependencies,
        Self::Secrets,
        Self::Tests,
        Self::Api,
        Self::Boundaries,
    ];

    /// Short name used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Dependencies => "dependencies",
            Self::Secrets => "secrets",
            Self::Tests => "tests",
            Self::Api => "api",
            Self::Boundaries => "boundaries",
        }
    }

    /// Operation name as exposed to tool-style callers.
    #[must_use]
    pub fn operation_name(self) -> &'static str {
        match self {
            Self::Structure => "analyzeStructure",
            Self::Dependencies => "checkDependencies",
            Self::Secrets => "scanSecrets",
            Self::Tests => "checkTests",
            Self::Api => "checkApiConventions",
            Self::Boundaries => "checkArchitectureBoundaries",
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Structure => "Detect controller/service/repository layer directories",
            Self::Dependencies => "Find forbidden library names in build, config and source files",
            Self::Secrets => "List .env files and strings that look like API keys or tokens",
            Self::Tests => "Detect test/tests directories",
            Self::Api => "Flag controllers that may return raw types instead of a wrapper",
            Self::Boundaries => "Flag controllers that mention Repository directly",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a check name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown check: {0}")]
pub struct UnknownCheck(pub String);

impl FromStr for CheckKind {
    type Err = UnknownCheck;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.as_str() == wanted
                    || kind.operation_name() == wanted
                    || to_snake_case(kind.operation_name()) == wanted
            })
            .ok_or_else(|| UnknownCheck(s.to_string()))
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Builder for configuring an [`Auditor`].
#[derive(Default)]
pub struct AuditorBuilder {
    config: Option<AuditConfig>,
    secret_patterns: Vec<SecretPattern>,
}

impl AuditorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: AuditConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds a secret pattern after the built-in and configured ones.
    #[must_use]
    pub fn secret_pattern(mut self, pattern: SecretPattern) -> Self {
        self.secret_patterns.push(pattern);
        self
    }

    /// Builds the auditor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or one of its
    /// `extra_secret_patterns` does not compile.
    pub fn build(self) -> Result<Auditor, AuditError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let mut extra_patterns = config
            .extra_secret_patterns
            .iter()
            .enumerate()
            .map(|(i, source)| SecretPattern::new(format!("custom-{}", i + 1), source))
            .collect::<Result<Vec<_>, _>>()?;
        extra_patterns.extend(self.secret_patterns);

        Ok(Auditor {
            config,
            extra_patterns,
        })
    }
}

/// Runs checks against a [`Source`].
///
/// Holds only read-only state, so one auditor can serve concurrent calls on
/// distinct sources.
///
/// Use [`Auditor::builder()`] or [`Auditor::new`] to construct an instance.
#[derive(Debug)]
pub struct Auditor {
    config: AuditConfig,
    extra_patterns: Vec<SecretPattern>,
}

impl Auditor {
    /// Creates a new builder for configuring an auditor.
    #[must_use]
    pub fn builder() -> AuditorBuilder {
        AuditorBuilder::new()
    }

    /// Creates an auditor from a configuration.
    ///
    /// # Errors
    ///
    /// See [`AuditorBuilder::build`].
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        Self::builder().config(config).build()
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Built-in patterns followed by configured and added ones.
    pub fn secret_patterns(&self) -> impl Iterator<Item = &SecretPattern> + Clone {
        builtin_patterns().iter().chain(self.extra_patterns.iter())
    }

    /// Reports which layer directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn analyze_structure(&self, source: &Source) -> Result<StructureReport, AuditError> {
        self.with_snapshot(CheckKind::Structure, source, structure::check)
    }

    /// Reports files that mention a forbidden library.
    ///
    /// `forbidden_libs` of `None` uses the configured default list.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn check_dependencies(
        &self,
        source: &Source,
        forbidden_libs: Option<&[String]>,
    ) -> Result<DependencyReport, AuditError> {
        let libs = forbidden_libs.unwrap_or(self.config.forbidden_libs.as_slice());
        self.with_snapshot(CheckKind::Dependencies, source, |snapshot| {
            dependencies::check(snapshot, &self.config, libs)
        })
    }

    /// Reports environment files and suspected secrets.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn scan_secrets(&self, source: &Source) -> Result<SecretReport, AuditError> {
        self.with_snapshot(CheckKind::Secrets, source, |snapshot| {
            secrets::check(snapshot, &self.config, self.secret_patterns())
        })
    }

    /// Reports `test` / `tests` directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn check_tests(&self, source: &Source) -> Result<TestReport, AuditError> {
        self.with_snapshot(CheckKind::Tests, source, test_dirs::check)
    }

    /// Reports controller files that may return raw types.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn check_api_conventions(&self, source: &Source) -> Result<ApiReport, AuditError> {
        self.with_snapshot(CheckKind::Api, source, |snapshot| {
            api::check(snapshot, &self.config)
        })
    }

    /// Reports controller files that mention `Repository`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn check_architecture_boundaries(
        &self,
        source: &Source,
    ) -> Result<BoundaryReport, AuditError> {
        self.with_snapshot(CheckKind::Boundaries, source, boundaries::check)
    }

    /// Runs the check named by `kind` with default parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn run(&self, kind: CheckKind, source: &Source) -> Result<Report, AuditError> {
        Ok(match kind {
            CheckKind::Structure => Report::Structure(self.analyze_structure(source)?),
            CheckKind::Dependencies => Report::Dependencies(self.check_dependencies(source, None)?),
            CheckKind::Secrets => Report::Secrets(self.scan_secrets(source)?),
            CheckKind::Tests => Report::Tests(self.check_tests(source)?),
            CheckKind::Api => Report::Api(self.check_api_conventions(source)?),
            CheckKind::Boundaries => {
                Report::Boundaries(self.check_architecture_boundaries(source)?)
            }
        })
    }

    /// Runs all six checks against one resolved root.
    ///
    /// A remote source is cloned once and released after the last check.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved.
    pub fn run_all(
        &self,
        source: &Source,
        forbidden_libs: Option<&[String]>,
    ) -> Result<AuditSummary, AuditError> {
        let libs = forbidden_libs.unwrap_or(self.config.forbidden_libs.as_slice());
        let scoped = ScopedRoot::acquire(source, &self.config)?;
        let root = scoped.root();
        info!("Running all checks on {}", root.path().display());

        let snapshot = Snapshot::take(root.path());
        let summary = AuditSummary {
            root: root.display_string(),
            structure: structure::check(&snapshot),
            dependencies: dependencies::check(&snapshot, &self.config, libs),
            secrets: secrets::check(&snapshot, &self.config, self.secret_patterns()),
            tests: test_dirs::check(&snapshot),
            api: api::check(&snapshot, &self.config),
            boundaries: boundaries::check(&snapshot),
        };

        info!(
            "All checks complete on {} ({} files)",
            summary.root,
            snapshot.files().len()
        );
        Ok(summary)
    }

    /// Resolves `source`, runs `analyze` on a fresh snapshot, then releases
    /// the root. Release happens on every exit path, after `analyze` returns.
    fn with_snapshot<T>(
        &self,
        kind: CheckKind,
        source: &Source,
        analyze: impl FnOnce(&Snapshot) -> T,
    ) -> Result<T, AuditError> {
        let scoped = ScopedRoot::acquire(source, &self.config)?;
        let root = scoped.root();
        info!(
            "Running {} check on {}{}",
            kind,
            root.path().display(),
            if root.is_ephemeral() { " (clone)" } else { "" }
        );

        let snapshot = Snapshot::take(root.path());
        let report = analyze(&snapshot);

        info!(
            "{} check complete: {} files scanned",
            kind,
            snapshot.files().len()
        );
        Ok(report)
    }
}
