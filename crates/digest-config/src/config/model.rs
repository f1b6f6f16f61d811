use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use digest_utils::types::ConfigSource;

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_MAX_TOKENS: usize = 4000;
pub const DEFAULT_PAGE_CONTENT_CHARS: usize = 1000;
pub const DEFAULT_OLLAMA_BINARY: &str = "ollama";
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LIST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PULL_TIMEOUT_SECS: u64 = 1800;

/// Effective configuration after layering.
#[derive(Debug, Clone)]
pub struct Config {
    pub defaults: Defaults,
    pub ollama: OllamaConfig,
    /// Config file that contributed values, if any.
    pub config_file: Option<PathBuf>,
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub model: Option<String>,
    pub max_tokens: Option<usize>,
    pub page_content_chars: Option<usize>,
    pub verbose: Option<bool>,
}

/// `[ollama]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Executable name or path.
    pub binary: Option<String>,
    pub run_timeout_secs: Option<u64>,
    pub list_timeout_secs: Option<u64>,
    pub check_timeout_secs: Option<u64>,
    pub pull_timeout_secs: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            model: Some(DEFAULT_MODEL.to_string()),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            page_content_chars: Some(DEFAULT_PAGE_CONTENT_CHARS),
            verbose: Some(false),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            binary: Some(DEFAULT_OLLAMA_BINARY.to_string()),
            run_timeout_secs: Some(DEFAULT_RUN_TIMEOUT_SECS),
            list_timeout_secs: Some(DEFAULT_LIST_TIMEOUT_SECS),
            check_timeout_secs: Some(DEFAULT_CHECK_TIMEOUT_SECS),
            pull_timeout_secs: Some(DEFAULT_PULL_TIMEOUT_SECS),
        }
    }
}

/// Keys tracked in `source_attribution`.
pub(crate) const CONFIG_KEYS: &[&str] = &[
    "model",
    "max_tokens",
    "page_content_chars",
    "verbose",
    "ollama_binary",
    "run_timeout_secs",
    "list_timeout_secs",
    "check_timeout_secs",
    "pull_timeout_secs",
];

pub(crate) fn default_attribution() -> HashMap<String, ConfigSource> {
    CONFIG_KEYS
        .iter()
        .map(|key| ((*key).to_string(), ConfigSource::Defaults))
        .collect()
}
