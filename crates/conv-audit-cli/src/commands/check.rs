//! Check command implementation.

use anyhow::Result;
use conv_audit_core::{Auditor, CheckKind, Report, Source};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs a single check and prints its report.
///
/// Exits with status 1 when the report has findings.
pub fn run(
    kind: CheckKind,
    source: &Source,
    forbidden_libs: Option<&[String]>,
    format: OutputFormat,
    config: &ConfigSource,
) -> Result<()> {
    let auditor = build_auditor(config)?;

    tracing::debug!("Running {} ({})", kind, kind.operation_name());

    let report = match kind {
        CheckKind::Dependencies => {
            Report::Dependencies(auditor.check_dependencies(source, forbidden_libs)?)
        }
        other => auditor.run(other, source)?,
    };

    super::output::print_report(&report, format)?;

    if report.has_findings() {
        std::process::exit(1);
    }

    Ok(())
}

/// Runs every check against one resolved root and prints all reports.
///
/// Exits with status 1 when any report has findings.
pub fn run_all(
    source: &Source,
    forbidden_libs: Option<&[String]>,
    format: OutputFormat,
    config: &ConfigSource,
) -> Result<()> {
    let auditor = build_auditor(config)?;
    let summary = auditor.run_all(source, forbidden_libs)?;

    super::output::print_summary(&summary, format)?;

    if summary.has_findings() {
        std::process::exit(1);
    }

    Ok(())
}

fn build_auditor(config: &ConfigSource) -> Result<Auditor> {
    Ok(Auditor::new(config.load()?)?)
}
