//! Inference backend abstraction
//!
//! The digest pipeline talks to a local language model through the
//! [`InferenceBackend`] trait. The only production backend drives the
//! `ollama` command-line tool; tests substitute their own implementations.

mod ollama_cli;

pub use digest_config as config;
pub use digest_runner as runner;
pub use digest_utils::error::LlmError;
pub use ollama_cli::{OllamaCliBackend, OllamaTimeouts, resolve_binary};

use crate::config::Config;
use tracing::{info, warn};

/// A local inference tool.
///
/// All calls are synchronous and bounded by the backend's own timeouts.
pub trait InferenceBackend {
    /// Short human-readable name used in messages.
    fn name(&self) -> &str;

    /// Check that the tool is installed and answering.
    ///
    /// # Errors
    ///
    /// * `LlmError::ToolNotFound` - the executable could not be started
    /// * `LlmError::NotRunning` - it started but reported failure
    /// * `LlmError::Timeout` - it did not answer in time
    fn check_available(&self) -> Result<(), LlmError>;

    /// `true` when [`check_available`](Self::check_available) succeeds.
    fn is_available(&self) -> bool {
        self.check_available().is_ok()
    }

    /// Names of the installed models.
    fn list_models(&self) -> Result<Vec<String>, LlmError>;

    /// Download `model`.
    fn pull_model(&self, model: &str) -> Result<(), LlmError>;

    /// Run `model` on `prompt` and return its trimmed output.
    fn run_model(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

impl<B: InferenceBackend + ?Sized> InferenceBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn check_available(&self) -> Result<(), LlmError> {
        (**self).check_available()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn list_models(&self) -> Result<Vec<String>, LlmError> {
        (**self).list_models()
    }

    fn pull_model(&self, model: &str) -> Result<(), LlmError> {
        (**self).pull_model(model)
    }

    fn run_model(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        (**self).run_model(model, prompt)
    }
}

/// Create the inference backend described by `config`.
///
/// # Errors
///
/// Returns `LlmError::ToolNotFound` if the configured binary cannot be located.
pub fn from_config(config: &Config) -> Result<Box<dyn InferenceBackend>, LlmError> {
    Ok(Box::new(OllamaCliBackend::new_from_config(config)?))
}

/// `true` if `model` is installed.
///
/// A requested name matches an installed one exactly or as a substring, so
/// `llama3.2` matches `llama3.2:latest`.
#[must_use]
pub fn model_is_installed(model: &str, installed: &[String]) -> bool {
    installed.iter().any(|name| name.contains(model))
}

/// Parse `ollama list` output into model names.
///
/// The first line is the column header; each following non-blank line
/// starts with the model name.
#[must_use]
pub fn parse_model_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// What [`ensure_model`] had to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    /// Already installed.
    Installed,
    /// Pulled during this run.
    Pulled,
    /// Pull failed; the run continues and the model run reports the real error.
    PullFailed(String),
}

/// Make sure `model` is installed, pulling it when missing.
///
/// A failed listing is treated as an empty list.
pub fn ensure_model<B: InferenceBackend + ?Sized>(backend: &B, model: &str) -> ModelStatus {
    let installed = backend.list_models().unwrap_or_else(|e| {
        warn!(error = %e, "could not list installed models");
        Vec::new()
    });

    if model_is_installed(model, &installed) {
        return ModelStatus::Installed;
    }

    info!(model = %model, "model not installed, pulling");
    match backend.pull_model(model) {
        Ok(()) => ModelStatus::Pulled,
        Err(e) => {
            warn!(model = %model, error = %e, "model pull failed, continuing");
            ModelStatus::PullFailed(e.to_string())
        }
    }
}
