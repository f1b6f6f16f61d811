use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Source of a configuration value.
///
/// Indicates where a configuration value originated from in the precedence chain:
/// CLI arguments > environment > config file > programmatic overrides > built-in defaults.
///
/// # Example
///
/// ```rust
/// use digest_utils::types::ConfigSource;
///
/// assert_eq!(ConfigSource::Cli.label(), "cli");
/// assert_eq!(ConfigSource::Defaults.label(), "default");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Value provided via CLI argument (highest precedence).
    Cli,
    /// Value read from a `BROWSING_DIGEST_*` environment variable.
    Env,
    /// Value loaded from a configuration file.
    ConfigFile(PathBuf),
    /// Value set through `Config::builder()`.
    Programmatic,
    /// Built-in default.
    Defaults,
}

impl ConfigSource {
    /// Stable short label used in logs and `effective_config()`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Env => "env",
            Self::ConfigFile(_) => "config",
            Self::Programmatic => "programmatic",
            Self::Defaults => "default",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFile(path) => write!(f, "config ({})", path.display()),
            other => f.write_str(other.label()),
        }
    }
}
