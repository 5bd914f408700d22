//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# conv-audit configuration
#
# Every key is optional; unset keys use the defaults shown here.

# Library names the dependency check reports when --forbid is not given
forbidden_libs = ["lombok"]

# Extensions (without the dot) the dependency check reads
dependency_extensions = ["gradle", "kts", "xml", "java", "kt", "txt", "md", "py"]

# Name prefix for temporary clone directories
temp_prefix = "conv-audit-"

# Characters of a secret match kept in reports before "..." is appended
snippet_limit = 60

# File name prefix that marks environment files
env_file_prefix = ".env"

# Wrapper types that clear a controller in the API-convention check
response_wrappers = ["ResponseEntity", "ApiResponse"]

# Extra secret regexes, run after the built-in ones
# extra_secret_patterns = ["ghp_[A-Za-z0-9]{36}"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to adjust the checks", config_path.display());
    println!("  2. Run: conv-audit all");

    Ok(())
}
