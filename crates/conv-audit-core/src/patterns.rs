//! Secret-detection patterns.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ConfigError;

/// Built-in patterns as `(name, regex)` pairs.
const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("openai-api-key", r"sk-[A-Za-z0-9]{20,}"),
    ("aws-access-key-id", r"AKIA[0-9A-Z]{16}"),
    ("slack-token", r"xox[baprs]-[A-Za-z0-9-]{10,}"),
    (
        "generic-api-key",
        r#"(?i)api[_-]?key\s*[:=]\s*['"\\][A-Za-z0-9\\-_=]{16,}"#,
    ),
];

#[allow(clippy::expect_used)]
static BUILTIN: LazyLock<Vec<SecretPattern>> = LazyLock::new(|| {
    BUILTIN_SOURCES
        .iter()
        .map(|(name, source)| SecretPattern {
            name: (*name).to_string(),
            regex: Regex::new(source).expect("built-in secret pattern must compile"),
        })
        .collect()
});

/// A named regular expression that flags likely secrets.
#[derive(Debug, Clone)]
pub struct SecretPattern {
    name: String,
    regex: Regex,
}

impl SecretPattern {
    /// Compiles a user-supplied pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if `source` is not a valid regex.
    pub fn new(name: impl Into<String>, source: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(source).map_err(|e| ConfigError::Pattern {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    /// Short identifier shown next to matches.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All non-overlapping matches in `text`.
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex.find_iter(text).map(|m| m.as_str())
    }
}

/// The built-in patterns, compiled once per process and shared read-only.
#[must_use]
pub fn builtin_patterns() -> &'static [SecretPattern] {
    &BUILTIN
}
