use std::time::Duration;

use digest_utils::error::ConfigError;

use super::model::default_attribution;
use super::{Config, ConfigSource, Defaults, OllamaConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digest_config::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::builder()
    ///     .model("mistral")
    ///     .max_tokens(2000)
    ///     .run_timeout(Duration::from_secs(300))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.model(), "mistral");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builds a [`Config`] without reading files or the environment.
///
/// Values set here are attributed to `ConfigSource::Programmatic`; unset
/// values keep their built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    page_content_chars: Option<usize>,
    verbose: Option<bool>,
    ollama_binary: Option<String>,
    run_timeout: Option<Duration>,
    list_timeout: Option<Duration>,
    check_timeout: Option<Duration>,
    pull_timeout: Option<Duration>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub const fn page_content_chars(mut self, chars: usize) -> Self {
        self.page_content_chars = Some(chars);
        self
    }

    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn ollama_binary(mut self, binary: impl Into<String>) -> Self {
        self.ollama_binary = Some(binary.into());
        self
    }

    #[must_use]
    pub const fn run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn list_timeout(mut self, timeout: Duration) -> Self {
        self.list_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn pull_timeout(mut self, timeout: Duration) -> Self {
        self.pull_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut config = Config {
            defaults: Defaults::default(),
            ollama: OllamaConfig::default(),
            config_file: None,
            source_attribution: default_attribution(),
        };

        if let Some(model) = self.model {
            config.defaults.model = Some(model);
            config.attribute("model", ConfigSource::Programmatic);
        }
        if let Some(max_tokens) = self.max_tokens {
            config.defaults.max_tokens = Some(max_tokens);
            config.attribute("max_tokens", ConfigSource::Programmatic);
        }
        if let Some(chars) = self.page_content_chars {
            config.defaults.page_content_chars = Some(chars);
            config.attribute("page_content_chars", ConfigSource::Programmatic);
        }
        if let Some(verbose) = self.verbose {
            config.defaults.verbose = Some(verbose);
            config.attribute("verbose", ConfigSource::Programmatic);
        }
        if let Some(binary) = self.ollama_binary {
            config.ollama.binary = Some(binary);
            config.attribute("ollama_binary", ConfigSource::Programmatic);
        }

        if let Some(timeout) = self.run_timeout {
            config.ollama.run_timeout_secs = Some(timeout.as_secs());
            config.attribute("run_timeout_secs", ConfigSource::Programmatic);
        }
        if let Some(timeout) = self.list_timeout {
            config.ollama.list_timeout_secs = Some(timeout.as_secs());
            config.attribute("list_timeout_secs", ConfigSource::Programmatic);
        }
        if let Some(timeout) = self.check_timeout {
            config.ollama.check_timeout_secs = Some(timeout.as_secs());
            config.attribute("check_timeout_secs", ConfigSource::Programmatic);
        }
        if let Some(timeout) = self.pull_timeout {
            config.ollama.pull_timeout_secs = Some(timeout.as_secs());
            config.attribute("pull_timeout_secs", ConfigSource::Programmatic);
        }

        config.validate()?;
        Ok(config)
    }
}
