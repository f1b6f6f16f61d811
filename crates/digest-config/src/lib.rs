//! Layered configuration for browsing-digest.
//!
//! Precedence: CLI > environment > config file > defaults.

pub mod config;

pub use config::{
    CliArgs, Config, ConfigBuilder, ConfigSource, Defaults, OllamaConfig, ENV_CONFIG, ENV_MODEL,
    ENV_OLLAMA_BINARY,
};
