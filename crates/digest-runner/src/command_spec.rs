use std::ffi::OsString;
use std::process::Command;

// ============================================================================
// CommandSpec - argv-style process specification
// ============================================================================

/// Specification for a command to execute.
///
/// Arguments are stored as `Vec<OsString>` and handed to
/// `Command::args()` unchanged. Optional stdin bytes are written to the child
/// by the runner after spawn.
///
/// # Example
///
/// ```rust
/// use digest_runner::CommandSpec;
/// use std::ffi::OsString;
///
/// let cmd = CommandSpec::new("ollama")
///     .arg("run")
///     .arg("llama3.2")
///     .stdin("Summarize this");
///
/// assert_eq!(cmd.program, OsString::from("ollama"));
/// assert_eq!(cmd.args.len(), 2);
/// assert_eq!(cmd.stdin.as_deref(), Some("Summarize this".as_bytes()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// The program to execute
    pub program: OsString,
    /// Arguments as discrete elements (NOT shell strings)
    pub args: Vec<OsString>,
    /// Bytes fed to the child's stdin; `None` means stdin is closed
    pub stdin: Option<Vec<u8>>,
}

impl CommandSpec {
    /// Create a new `CommandSpec` with the given program.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Add a single argument to the command.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command.
    ///
    /// ```rust
    /// use digest_runner::CommandSpec;
    ///
    /// let cmd = CommandSpec::new("ollama").args(["pull", "mistral"]);
    /// assert_eq!(cmd.args.len(), 2);
    /// ```
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Provide input for the child's stdin.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Program name for messages and logs.
    #[must_use]
    pub fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Convert this `CommandSpec` into a `std::process::Command`.
    ///
    /// Stdio wiring is left to the runner.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}
