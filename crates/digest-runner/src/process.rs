use crate::error::RunnerError;
use std::time::Duration;

use super::CommandSpec;

// ============================================================================
// ProcessRunner Trait
// ============================================================================

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output from the process
    pub stdout: Vec<u8>,
    /// Standard error from the process
    pub stderr: Vec<u8>,
    /// Exit code from the process (None if terminated by signal)
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Create a new `ProcessOutput` with the given values.
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>, exit_code: Option<i32>) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    /// Get stdout as a UTF-8 string, lossy conversion.
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Last `max_bytes` of stderr, for error messages.
    #[must_use]
    pub fn stderr_tail(&self, max_bytes: usize) -> String {
        let start = self.stderr.len().saturating_sub(max_bytes);
        String::from_utf8_lossy(&self.stderr[start..])
            .trim()
            .to_string()
    }

    /// Check if the process exited successfully (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for process execution.
///
/// Implementations MUST use argv-style APIs only (no shell string evaluation)
/// and MUST return [`RunnerError::Timeout`] when the wall-clock limit elapses.
/// The interface is synchronous; a non-zero exit is reported through
/// [`ProcessOutput::exit_code`], not as an error.
pub trait ProcessRunner {
    /// Execute a command with the given timeout.
    ///
    /// # Errors
    ///
    /// * `RunnerError::Timeout` - The process did not finish in time and was killed
    /// * `RunnerError::SpawnFailed` - The program could not be started
    /// * `RunnerError::WaitFailed` - Output could not be collected
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        (**self).run(cmd, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_output_success() {
        assert!(ProcessOutput::new(Vec::new(), Vec::new(), Some(0)).success());
        assert!(!ProcessOutput::new(Vec::new(), Vec::new(), Some(1)).success());
        // Killed by signal
        assert!(!ProcessOutput::new(Vec::new(), Vec::new(), None).success());
    }

    #[test]
    fn test_process_output_lossy_utf8() {
        let invalid_utf8 = vec![0xff, 0xfe, 0x00, 0x01];
        let output = ProcessOutput::new(invalid_utf8.clone(), invalid_utf8, Some(0));

        assert!(!output.stdout_string().is_empty());
        assert!(!output.stderr_tail(16).is_empty());
    }

    #[test]
    fn test_stderr_tail_keeps_end() {
        let output = ProcessOutput::new(Vec::new(), b"line one\nline two\n".to_vec(), Some(1));
        assert_eq!(output.stderr_tail(9), "line two");
        assert_eq!(output.stderr_tail(4096), "line one\nline two");
    }

    struct MockRunner {
        expected_output: ProcessOutput,
    }

    impl ProcessRunner for MockRunner {
        fn run(
            &self,
            _cmd: &CommandSpec,
            _timeout: Duration,
        ) -> Result<ProcessOutput, RunnerError> {
            Ok(self.expected_output.clone())
        }
    }

    #[test]
    fn test_process_runner_through_reference() {
        fn run_with<R: ProcessRunner>(runner: R) -> ProcessOutput {
            runner
                .run(&CommandSpec::new("ollama").arg("list"), Duration::from_secs(5))
                .unwrap()
        }

        let mock = MockRunner {
            expected_output: ProcessOutput::new(b"NAME\n".to_vec(), Vec::new(), Some(0)),
        };

        let output = run_with(&mock);
        assert_eq!(output.stdout_string(), "NAME\n");
        assert!(output.success());
    }
}
