//! Configuration management for browsing-digest
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > environment > file > defaults. Config files are TOML with optional
//! `[defaults]` and `[ollama]` sections.

mod builder;
mod cli_args;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use cli_args::CliArgs;
pub use discovery::{ENV_CONFIG, ENV_MODEL, ENV_OLLAMA_BINARY};
pub use digest_utils::types::ConfigSource;
pub use model::*;

use std::time::Duration;

impl Config {
    #[must_use]
    pub fn model(&self) -> &str {
        self.defaults.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    #[must_use]
    pub fn max_tokens(&self) -> usize {
        self.defaults.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    #[must_use]
    pub fn page_content_chars(&self) -> usize {
        self.defaults
            .page_content_chars
            .unwrap_or(DEFAULT_PAGE_CONTENT_CHARS)
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    #[must_use]
    pub fn ollama_binary(&self) -> &str {
        self.ollama.binary.as_deref().unwrap_or(DEFAULT_OLLAMA_BINARY)
    }

    /// Wall-clock limit for `ollama run`.
    #[must_use]
    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.ollama.run_timeout_secs.unwrap_or(DEFAULT_RUN_TIMEOUT_SECS))
    }

    /// Wall-clock limit for `ollama list` when listing models.
    #[must_use]
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(
            self.ollama
                .list_timeout_secs
                .unwrap_or(DEFAULT_LIST_TIMEOUT_SECS),
        )
    }

    /// Wall-clock limit for the availability check.
    #[must_use]
    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(
            self.ollama
                .check_timeout_secs
                .unwrap_or(DEFAULT_CHECK_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn pull_timeout(&self) -> Duration {
        Duration::from_secs(
            self.ollama
                .pull_timeout_secs
                .unwrap_or(DEFAULT_PULL_TIMEOUT_SECS),
        )
    }

    /// Where the effective value of `key` came from.
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .cloned()
            .unwrap_or(ConfigSource::Defaults)
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Config {
    /// Built-in defaults only, without discovery.
    pub fn minimal_for_testing() -> Self {
        Config {
            defaults: Defaults::default(),
            ollama: OllamaConfig::default(),
            config_file: None,
            source_attribution: model::default_attribution(),
        }
    }
}
