use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Library-level error type with user-friendly reporting.
///
/// `DigestError` is returned by every fallible step of the digest pipeline.
/// It provides:
/// - Detailed error information for programmatic handling
/// - User-friendly messages with context and suggestions
/// - Mapping to CLI exit codes
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors |
/// | 3 | Input file errors |
/// | 4 | Empty page list / empty prompt |
/// | 10 | Inference timeout |
/// | 70 | Inference tool failure |
/// | 1 | Other errors |
///
/// Library code returns `DigestError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Inference error: {0}")]
    Llm(#[from] LlmError),

    #[error("No browsing data found in the input file")]
    EmptyPageList,

    #[error("No content to summarize after budgeting")]
    EmptyPrompt,

    #[error("Failed to write digest to {path}: {reason}")]
    ReportWrite { path: String, reason: String },
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Inference,
    FileSystem,
    Content,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Input => write!(f, "Input"),
            Self::Inference => write!(f, "Inference"),
            Self::FileSystem => write!(f, "File System"),
            Self::Content => write!(f, "Content"),
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::InvalidFile(_) => Some(
                "Configuration files must be valid TOML with optional [defaults] and [ollama] sections."
                    .to_string(),
            ),
            Self::InvalidValue { key, .. } => Some(format!(
                "The '{key}' option must be a positive value."
            )),
            Self::NotFound { .. } => {
                Some("An explicit --config path must point to an existing file.".to_string())
            }
            Self::DiscoveryFailed { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile(_) => vec![
                "Check .browsing-digest/config.toml for TOML syntax errors".to_string(),
                "Remove unknown keys or fix value types".to_string(),
            ],
            Self::InvalidValue { key, .. } => vec![
                format!("Fix the '{key}' value in your config file or CLI flags"),
                "Timeouts are whole seconds and must be at least 1".to_string(),
            ],
            Self::NotFound { .. } => vec![
                "Check the path passed to --config".to_string(),
                "Omit --config to use automatic discovery".to_string(),
            ],
            Self::DiscoveryFailed { .. } => {
                vec!["Pass an explicit --config path".to_string()]
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

/// Errors loading the browsing export
#[derive(Error, Debug)]
pub enum InputError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Expected JSON file, got: {extension}")]
    WrongExtension { path: String, extension: String },

    #[error("Cannot read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid JSON in {path}: {reason}")]
    InvalidJson { path: String, reason: String },
}

impl UserFriendlyError for InputError {
    fn user_message(&self) -> String {
        match self {
            Self::NotFound { path } => format!("Error loading file: file not found: {path}"),
            Self::WrongExtension { path, extension } => {
                let shown = if extension.is_empty() {
                    "(no extension)"
                } else {
                    extension.as_str()
                };
                format!("Error loading file: expected a .json file, got {shown} ({path})")
            }
            Self::Unreadable { path, reason } => {
                format!("Error loading file: cannot read {path}: {reason}")
            }
            Self::InvalidJson { path, reason } => {
                format!("Error loading file: {path} is not a valid browsing export: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        Some(
            "The input is the JSON file exported by the browsing digest extension: \
             {\"date\": ..., \"pages\": [...], \"totalPages\": ...}."
                .to_string(),
        )
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { .. } => vec![
                "Check the file path and try again".to_string(),
                "Export today's history from the browser extension first".to_string(),
            ],
            Self::WrongExtension { .. } => {
                vec!["Pass the .json export, not a converted or renamed file".to_string()]
            }
            Self::Unreadable { .. } => vec!["Check file permissions".to_string()],
            Self::InvalidJson { .. } => vec![
                "Re-export the file; it may be truncated".to_string(),
                "Validate the file with a JSON linter".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

/// Errors that can occur while talking to the inference tool
#[derive(Debug, Error)]
pub enum LlmError {
    /// The tool binary could not be found or started
    #[error("Inference tool '{binary}' not found: {reason}")]
    ToolNotFound { binary: String, reason: String },

    /// The tool is installed but its server is not answering
    #[error("Inference tool is not running: {0}")]
    NotRunning(String),

    /// Invocation timed out
    #[error("Timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// The tool exited with a non-zero status
    #[error("'{command}' failed (exit code {code:?}): {stderr_tail}")]
    ExitFailure {
        command: String,
        code: Option<i32>,
        stderr_tail: String,
    },

    /// Any other process-level failure
    #[error("Transport error: {0}")]
    Transport(String),
}

impl UserFriendlyError for LlmError {
    fn user_message(&self) -> String {
        match self {
            Self::ToolNotFound { binary, .. } => format!("Ollama not found ('{binary}')"),
            Self::NotRunning(_) => "Ollama is not running!".to_string(),
            Self::Timeout { duration } => format!(
                "Ollama timed out after {}s. The model might be too slow or the input too large.",
                duration.as_secs()
            ),
            Self::ExitFailure {
                command,
                code,
                stderr_tail,
            } => {
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                if stderr_tail.is_empty() {
                    format!("Ollama error: '{command}' exited with {code}")
                } else {
                    format!("Ollama error: '{command}' exited with {code}: {stderr_tail}")
                }
            }
            Self::Transport(msg) => format!("Error generating summary: {msg}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::ToolNotFound { reason, .. } => Some(reason.clone()),
            Self::NotRunning(detail) if !detail.is_empty() => Some(detail.clone()),
            Self::Timeout { .. } => Some(
                "The model run is bounded by a fixed timeout; the run was aborted without a partial digest."
                    .to_string(),
            ),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ToolNotFound { .. } => vec![
                "Install Ollama from https://ollama.ai".to_string(),
                "Or point --ollama-binary at the executable".to_string(),
            ],
            Self::NotRunning(_) => vec![
                "Start it with: ollama serve".to_string(),
                "Or install from: https://ollama.ai".to_string(),
            ],
            Self::Timeout { .. } => vec![
                "Raise the limit with --timeout <SECS>".to_string(),
                "Lower --max-tokens to send a smaller prompt".to_string(),
                "Try a smaller model with --model".to_string(),
            ],
            Self::ExitFailure { .. } => vec![
                "Run 'ollama list' to confirm the model is installed".to_string(),
                "Re-run with --verbose for the full command line".to_string(),
            ],
            Self::Transport(_) => {
                vec!["Re-run with --verbose for details".to_string()]
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Inference
    }
}

impl UserFriendlyError for DigestError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Input(err) => err.user_message(),
            Self::Llm(err) => err.user_message(),
            Self::EmptyPageList => "No browsing data found in the file".to_string(),
            Self::EmptyPrompt => "No content to summarize".to_string(),
            Self::ReportWrite { path, reason } => {
                format!("Could not save digest to {path}: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Input(err) => err.context(),
            Self::Llm(err) => err.context(),
            Self::EmptyPageList => {
                Some("The export contains an empty \"pages\" list.".to_string())
            }
            Self::EmptyPrompt => Some(
                "Not even the first page fit inside the token budget.".to_string(),
            ),
            Self::ReportWrite { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Input(err) => err.suggestions(),
            Self::Llm(err) => err.suggestions(),
            Self::EmptyPageList => {
                vec!["Browse a little, then export again".to_string()]
            }
            Self::EmptyPrompt => vec!["Raise the budget with --max-tokens".to_string()],
            Self::ReportWrite { .. } => vec![
                "Choose another location with --output".to_string(),
                "Check that the target directory is writable".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(err) => err.category(),
            Self::Input(err) => err.category(),
            Self::Llm(err) => err.category(),
            Self::ReportWrite { .. } => ErrorCategory::FileSystem,
            Self::EmptyPageList | Self::EmptyPrompt => ErrorCategory::Content,
        }
    }
}

impl DigestError {
    /// Get a user-friendly error message with context and actionable suggestions.
    ///
    /// ```text
    /// Error: <user message>
    ///
    /// Context: <context if available>
    ///
    /// Suggestions:
    ///   • <suggestion 1>
    /// ```
    ///
    /// # Example
    ///
    /// ```rust
    /// use digest_utils::error::DigestError;
    ///
    /// let message = DigestError::EmptyPageList.display_for_user();
    /// assert!(message.starts_with("Error: No browsing data found"));
    /// assert!(message.contains("Suggestions:"));
    /// ```
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error: {}\n", self.user_message()));

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the appropriate CLI exit code.
    ///
    /// This is the single source of truth for process exit status.
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            Self::Config(_) => ExitCode::CLI_ARGS,
            Self::Input(_) => ExitCode::INPUT_INVALID,
            Self::EmptyPageList | Self::EmptyPrompt => ExitCode::NO_CONTENT,
            Self::Llm(llm_err) => match llm_err {
                LlmError::Timeout { .. } => ExitCode::INFERENCE_TIMEOUT,
                LlmError::ToolNotFound { .. }
                | LlmError::NotRunning(_)
                | LlmError::ExitFailure { .. }
                | LlmError::Transport(_) => ExitCode::INFERENCE_FAILURE,
            },
            Self::ReportWrite { .. } => ExitCode::INTERNAL,
        }
    }
}
