use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use digest_utils::error::ConfigError;

use super::model::default_attribution;
use super::{CliArgs, Config, ConfigSource, Defaults, OllamaConfig};

/// Names an explicit config file.
pub const ENV_CONFIG: &str = "BROWSING_DIGEST_CONFIG";
/// Overrides `[defaults].model`.
pub const ENV_MODEL: &str = "BROWSING_DIGEST_MODEL";
/// Overrides `[ollama].binary`.
pub const ENV_OLLAMA_BINARY: &str = "BROWSING_DIGEST_OLLAMA_BINARY";

const CONFIG_DIR: &str = ".browsing-digest";
const CONFIG_FILE: &str = "config.toml";

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    defaults: Option<Defaults>,
    ollama: Option<OllamaConfig>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery and the
    /// process environment for overrides.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("cannot determine current directory: {e}"),
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover configuration starting from a specific directory.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        Self::discover_with_env(start_dir, cli_args, |key| std::env::var(key).ok())
    }

    /// Path- and environment-driven variant used by tests to avoid
    /// process-global state.
    pub fn discover_with_env<F>(
        start_dir: &Path,
        cli_args: &CliArgs,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let mut config = Self {
            defaults: Defaults::default(),
            ollama: OllamaConfig::default(),
            config_file: None,
            source_attribution: default_attribution(),
        };

        let explicit = cli_args
            .config_path
            .clone()
            .or_else(|| env(ENV_CONFIG).map(PathBuf::from));

        let config_path = match explicit {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound {
                    path: path.display().to_string(),
                });
            }
            Some(path) => Some(path),
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = config_path {
            let file_config = Self::load_config_file(&path)?;
            config.apply_file(file_config, &path);
            debug!(path = %path.display(), "loaded config file");
            config.config_file = Some(path);
        }

        if let Some(model) = env(ENV_MODEL) {
            config.defaults.model = Some(model);
            config.attribute("model", ConfigSource::Env);
        }
        if let Some(binary) = env(ENV_OLLAMA_BINARY) {
            config.ollama.binary = Some(binary);
            config.attribute("ollama_binary", ConfigSource::Env);
        }

        config.apply_cli(cli_args);
        config.validate()?;
        Ok(config)
    }

    /// Walk upward from `start_dir` looking for `.browsing-digest/config.toml`.
    ///
    /// The walk stops at the filesystem root or at a repository root
    /// (`.git`, `.hg`, `.svn`), whichever comes first.
    #[must_use]
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current = Some(start_dir);

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if [".git", ".hg", ".svn"].iter().any(|m| dir.join(m).exists()) {
                break;
            }
            current = dir.parent();
        }

        None
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidFile(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {e}", path.display())))
    }

    fn apply_file(&mut self, file: TomlConfig, path: &Path) {
        let source = ConfigSource::ConfigFile(path.to_path_buf());

        if let Some(defaults) = file.defaults {
            if defaults.model.is_some() {
                self.defaults.model = defaults.model;
                self.attribute("model", source.clone());
            }
            if defaults.max_tokens.is_some() {
                self.defaults.max_tokens = defaults.max_tokens;
                self.attribute("max_tokens", source.clone());
            }
            if defaults.page_content_chars.is_some() {
                self.defaults.page_content_chars = defaults.page_content_chars;
                self.attribute("page_content_chars", source.clone());
            }
            if defaults.verbose.is_some() {
                self.defaults.verbose = defaults.verbose;
                self.attribute("verbose", source.clone());
            }
        }

        if let Some(ollama) = file.ollama {
            if ollama.binary.is_some() {
                self.ollama.binary = ollama.binary;
                self.attribute("ollama_binary", source.clone());
            }
            if ollama.run_timeout_secs.is_some() {
                self.ollama.run_timeout_secs = ollama.run_timeout_secs;
                self.attribute("run_timeout_secs", source.clone());
            }
            if ollama.list_timeout_secs.is_some() {
                self.ollama.list_timeout_secs = ollama.list_timeout_secs;
                self.attribute("list_timeout_secs", source.clone());
            }
            if ollama.check_timeout_secs.is_some() {
                self.ollama.check_timeout_secs = ollama.check_timeout_secs;
                self.attribute("check_timeout_secs", source.clone());
            }
            if ollama.pull_timeout_secs.is_some() {
                self.ollama.pull_timeout_secs = ollama.pull_timeout_secs;
                self.attribute("pull_timeout_secs", source);
            }
        }
    }

    fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(model) = &cli.model {
            self.defaults.model = Some(model.clone());
            self.attribute("model", ConfigSource::Cli);
        }
        if let Some(max_tokens) = cli.max_tokens {
            self.defaults.max_tokens = Some(max_tokens);
            self.attribute("max_tokens", ConfigSource::Cli);
        }
        if let Some(secs) = cli.run_timeout_secs {
            self.ollama.run_timeout_secs = Some(secs);
            self.attribute("run_timeout_secs", ConfigSource::Cli);
        }
        if let Some(binary) = &cli.ollama_binary {
            self.ollama.binary = Some(binary.clone());
            self.attribute("ollama_binary", ConfigSource::Cli);
        }
        // `--verbose` can only switch logging on.
        if cli.verbose == Some(true) {
            self.defaults.verbose = Some(true);
            self.attribute("verbose", ConfigSource::Cli);
        }
    }

    pub(crate) fn attribute(&mut self, key: &str, source: ConfigSource) {
        self.source_attribution.insert(key.to_string(), source);
    }
}
