use crate::error::RunnerError;
use std::io::{ErrorKind, Write};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{CommandSpec, ProcessOutput, ProcessRunner};

// ============================================================================
// NativeRunner
// ============================================================================

/// Native process runner using `std::process::Command`.
///
/// Stdout and stderr are captured. When the command carries stdin bytes they are
/// written from a helper thread so a child that produces output before it has
/// consumed all of its input cannot deadlock the runner.
///
/// The timeout is enforced on a waiter thread; when it elapses the child is
/// killed and [`RunnerError::Timeout`] is returned.
///
/// # Example
///
/// ```rust,no_run
/// use digest_runner::{CommandSpec, NativeRunner, ProcessRunner};
/// use std::time::Duration;
///
/// let runner = NativeRunner::new();
/// let cmd = CommandSpec::new("ollama").arg("list");
///
/// let output = runner.run(&cmd, Duration::from_secs(10)).unwrap();
/// println!("{}", output.stdout_string());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRunner;

impl NativeRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NativeRunner {
    fn run(&self, cmd: &CommandSpec, timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        use std::sync::mpsc;
        use std::thread;

        let program = cmd.program_display();
        let started = Instant::now();

        let mut command = cmd.to_command();
        command
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(program = %program, args = ?cmd.args, timeout_secs = timeout.as_secs(), "Spawning process");

        let mut child = command.spawn().map_err(|e| RunnerError::SpawnFailed {
            program: program.clone(),
            reason: e.to_string(),
            not_found: e.kind() == ErrorKind::NotFound,
        })?;

        let child_id = child.id();

        let stdin_writer = match (cmd.stdin.clone(), child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(thread::spawn(move || {
                // A child that exits early closes the pipe; that is not our error to report
                if let Err(e) = pipe.write_all(&input) {
                    debug!(error = %e, "stdin write ended early");
                }
                // Dropping the pipe closes stdin so the child sees EOF
            })),
            _ => None,
        };

        let (tx, rx) = mpsc::channel();
        let waiter = thread::spawn(move || {
            let output = child.wait_with_output();
            let _ = tx.send(output);
        });

        let result = match rx.recv_timeout(timeout) {
            Ok(output_result) => {
                let _ = waiter.join();

                let output = output_result.map_err(|e| RunnerError::WaitFailed {
                    program: program.clone(),
                    reason: e.to_string(),
                })?;

                debug!(
                    program = %program,
                    exit_code = ?output.status.code(),
                    duration_ms = %started.elapsed().as_millis(),
                    "Process finished"
                );

                Ok(ProcessOutput::new(
                    output.stdout,
                    output.stderr,
                    output.status.code(),
                ))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(program = %program, timeout_secs = timeout.as_secs(), "Process timed out, terminating");
                Self::terminate_process(child_id);
                let _ = waiter.join();

                Err(RunnerError::Timeout {
                    program: program.clone(),
                    timeout_seconds: timeout.as_secs(),
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RunnerError::WaitFailed {
                program: program.clone(),
                reason: "process monitoring thread terminated unexpectedly".to_string(),
            }),
        };

        if let Some(writer) = stdin_writer {
            let _ = writer.join();
        }

        result
    }
}

impl NativeRunner {
    /// Terminate a process by its PID.
    ///
    /// On Unix, sends SIGKILL to the process.
    /// On Windows, uses TerminateProcess.
    fn terminate_process(pid: u32) {
        #[cfg(unix)]
        {
            unsafe {
                libc::kill(pid as i32, libc::SIGKILL);
            }
        }

        #[cfg(windows)]
        {
            use windows::Win32::Foundation::CloseHandle;
            use windows::Win32::System::Threading::{
                OpenProcess, PROCESS_TERMINATE, TerminateProcess,
            };

            unsafe {
                if let Ok(handle) = OpenProcess(PROCESS_TERMINATE, false, pid) {
                    let _ = TerminateProcess(handle, 1);
                    let _ = CloseHandle(handle);
                }
            }
        }

        #[cfg(not(any(unix, windows)))]
        {
            let _ = pid;
        }
    }
}
