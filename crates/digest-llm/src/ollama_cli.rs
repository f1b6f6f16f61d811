//! Inference backend for the `ollama` command-line tool.
//!
//! Every call is a short-lived `ollama` subprocess run through a
//! [`ProcessRunner`]: `list` to check the server and enumerate models,
//! `pull` to fetch a missing model, and `run <model>` with the prompt on stdin.

use crate::config::Config;
use crate::runner::{CommandSpec, NativeRunner, ProcessOutput, ProcessRunner, RunnerError};
use crate::{InferenceBackend, LlmError, parse_model_list};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Bytes of stderr kept in error messages.
const STDERR_TAIL_BYTES: usize = 2048;

/// Wall-clock limits for each kind of `ollama` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OllamaTimeouts {
    pub run: Duration,
    pub list: Duration,
    pub check: Duration,
    pub pull: Duration,
}

impl Default for OllamaTimeouts {
    fn default() -> Self {
        Self {
            run: Duration::from_secs(120),
            list: Duration::from_secs(10),
            check: Duration::from_secs(5),
            pull: Duration::from_secs(1800),
        }
    }
}

impl OllamaTimeouts {
    #[must_use]
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            run: cfg.run_timeout(),
            list: cfg.list_timeout(),
            check: cfg.check_timeout(),
            pull: cfg.pull_timeout(),
        }
    }
}

/// Locate the `ollama` executable.
///
/// A value containing a path separator is used as-is and must exist;
/// a bare name is searched for in `PATH`.
///
/// # Errors
///
/// Returns `LlmError::ToolNotFound` when nothing executable is found.
pub fn resolve_binary(binary: &str) -> Result<PathBuf, LlmError> {
    let path = Path::new(binary);
    if path.is_absolute() || path.components().count() > 1 {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(LlmError::ToolNotFound {
            binary: binary.to_string(),
            reason: format!("{} does not exist", path.display()),
        });
    }

    which::which(binary).map_err(|e| LlmError::ToolNotFound {
        binary: binary.to_string(),
        reason: format!("'{binary}' was not found in PATH ({e})"),
    })
}

/// Ollama CLI backend.
pub struct OllamaCliBackend<R = NativeRunner> {
    binary: PathBuf,
    runner: R,
    timeouts: OllamaTimeouts,
}

impl OllamaCliBackend<NativeRunner> {
    /// Create a backend from configuration, resolving the binary up front.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::ToolNotFound` if the binary cannot be located.
    pub fn new_from_config(cfg: &Config) -> Result<Self, LlmError> {
        let binary = resolve_binary(cfg.ollama_binary())?;
        debug!(binary = %binary.display(), "using ollama binary");
        Ok(Self::with_runner(
            binary,
            NativeRunner::new(),
            OllamaTimeouts::from_config(cfg),
        ))
    }
}

impl<R: ProcessRunner> OllamaCliBackend<R> {
    /// Create a backend that runs `binary` through `runner`.
    #[must_use]
    pub const fn with_runner(binary: PathBuf, runner: R, timeouts: OllamaTimeouts) -> Self {
        Self {
            binary,
            runner,
            timeouts,
        }
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    #[must_use]
    pub const fn timeouts(&self) -> &OllamaTimeouts {
        &self.timeouts
    }

    fn command(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new(self.binary.as_os_str()).args(args)
    }

    /// Command line for messages, e.g. `ollama run llama3.2`.
    fn describe(args: &[&str]) -> String {
        format!("ollama {}", args.join(" "))
    }

    fn invoke(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, LlmError> {
        debug!(
            program = %cmd.program_display(),
            args = ?cmd.args,
            timeout_secs = timeout.as_secs(),
            "invoking ollama"
        );
        self.runner
            .run(cmd, timeout)
            .map_err(|e| self.map_runner_error(e, timeout))
    }

    fn map_runner_error(&self, err: RunnerError, timeout: Duration) -> LlmError {
        match err {
            RunnerError::Timeout { .. } => LlmError::Timeout { duration: timeout },
            e if e.is_not_found() => LlmError::ToolNotFound {
                binary: self.binary.display().to_string(),
                reason: e.to_string(),
            },
            e => LlmError::Transport(e.to_string()),
        }
    }

    fn exit_failure(args: &[&str], output: &ProcessOutput) -> LlmError {
        LlmError::ExitFailure {
            command: Self::describe(args),
            code: output.exit_code,
            stderr_tail: output.stderr_tail(STDERR_TAIL_BYTES),
        }
    }
}

impl<R: ProcessRunner> InferenceBackend for OllamaCliBackend<R> {
    fn name(&self) -> &str {
        "ollama"
    }

    fn check_available(&self) -> Result<(), LlmError> {
        let output = match self.invoke(&self.command(&["list"]), self.timeouts.check) {
            // A server that does not answer the check in time counts as down
            Err(LlmError::Timeout { duration }) => {
                return Err(LlmError::NotRunning(format!(
                    "'ollama list' did not answer within {}s",
                    duration.as_secs()
                )));
            }
            other => other?,
        };
        if output.success() {
            Ok(())
        } else {
            Err(LlmError::NotRunning(output.stderr_tail(STDERR_TAIL_BYTES)))
        }
    }

    fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let args = ["list"];
        let output = self.invoke(&self.command(&args), self.timeouts.list)?;
        if !output.success() {
            return Err(Self::exit_failure(&args, &output));
        }
        Ok(parse_model_list(&output.stdout_string()))
    }

    fn pull_model(&self, model: &str) -> Result<(), LlmError> {
        let args = ["pull", model];
        let output = self.invoke(&self.command(&args), self.timeouts.pull)?;
        if !output.success() {
            return Err(Self::exit_failure(&args, &output));
        }
        Ok(())
    }

    fn run_model(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let args = ["run", model];
        let cmd = self.command(&args).stdin(prompt);
        let output = self.invoke(&cmd, self.timeouts.run)?;
        if !output.success() {
            return Err(Self::exit_failure(&args, &output));
        }
        Ok(output.stdout_string().trim().to_string())
    }
}
