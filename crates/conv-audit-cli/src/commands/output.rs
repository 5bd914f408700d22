//! Shared output formatting for reports.

use anyhow::Result;
use conv_audit_core::{AuditSummary, Layer, Report};

use crate::OutputFormat;

/// Print one report in the specified format.
pub fn print_report(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            println!("root: {}\n", report.root());
            print_text(report);
        }
    }
    Ok(())
}

/// Print all reports of an `all` run in the specified format.
pub fn print_summary(summary: &AuditSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Text => {
            println!("root: {}", summary.root);
            for report in summary.reports() {
                println!();
                print_text(&report);
            }
        }
    }
    Ok(())
}

fn print_text(report: &Report) {
    let status = if report.has_findings() {
        "\x1b[33mfindings\x1b[0m"
    } else {
        "\x1b[32mok\x1b[0m"
    };
    println!("[{}] {}", report.kind(), status);

    match report {
        Report::Structure(r) => {
            for layer in Layer::ALL {
                let paths = r.layer_paths.get(&layer).map_or(&[][..], Vec::as_slice);
                let mark = if r.layers.get(&layer).copied().unwrap_or(false) {
                    "yes"
                } else {
                    "no"
                };
                println!("  {layer:<11} {mark}");
                print_list(paths);
            }
        }
        Report::Dependencies(r) => {
            for (lib, files) in &r.violations {
                println!("  {lib}: {} file(s)", files.len());
                print_list(files);
            }
        }
        Report::Secrets(r) => {
            println!("  env files: {}", r.env_files.len());
            print_list(&r.env_files);
            println!("  suspected secrets: {}", r.suspected_secrets.len());
            for m in &r.suspected_secrets {
                println!("    {} [{}] {}", m.file, m.pattern, m.snippet);
            }
        }
        Report::Tests(r) => {
            println!("  test directories: {}", r.test_dirs.len());
            print_list(&r.test_dirs);
        }
        Report::Api(r) => {
            println!(
                "  controller files: {}, possible raw responses: {}",
                r.controller_files.len(),
                r.possible_raw_responses.len()
            );
            print_list(&r.possible_raw_responses);
        }
        Report::Boundaries(r) => {
            println!(
                "  controllers mentioning Repository: {}",
                r.controller_direct_repository_usages.len()
            );
            print_list(&r.controller_direct_repository_usages);
        }
    }
}

fn print_list(items: &[String]) {
    for item in items {
        println!("    {item}");
    }
}
