//! List checks command implementation.

use conv_audit_core::CheckKind;

/// Runs the list-checks command.
pub fn run() {
    println!("Available checks:\n");

    for kind in CheckKind::ALL {
        println!("  {:<14} {:<30} {}", kind.as_str(), kind.operation_name(), kind.description());
    }

    println!("\nUsage: conv-audit check <CHECK> [PATH] [--remote URL]");
}
