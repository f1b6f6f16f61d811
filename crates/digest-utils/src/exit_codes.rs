//! Exit code constants and error mapping for browsing-digest.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Digest written (or models listed) |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments or configuration |
//! | 3 | `INPUT_INVALID` | Input file missing, unreadable, not `.json`, or malformed |
//! | 4 | `NO_CONTENT` | No pages, or nothing left after budgeting |
//! | 10 | `INFERENCE_TIMEOUT` | Inference tool exceeded its timeout |
//! | 70 | `INFERENCE_FAILURE` | Inference tool missing, not running, or exited non-zero |

use crate::error::DigestError;

/// Exit codes matching the documented exit code table.
///
/// # Example
///
/// ```rust
/// use digest_utils::exit_codes::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::INFERENCE_FAILURE, ExitCode::from_i32(70));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid or missing command-line arguments or config
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Input invalid - the browsing export could not be loaded
    pub const INPUT_INVALID: ExitCode = ExitCode(3);

    /// No content - nothing to summarize
    pub const NO_CONTENT: ExitCode = ExitCode(4);

    /// Inference timeout - the model run exceeded its wall-clock limit
    pub const INFERENCE_TIMEOUT: ExitCode = ExitCode(10);

    /// Inference failure - the external tool failed or is unavailable
    pub const INFERENCE_FAILURE: ExitCode = ExitCode(70);

    /// Get the numeric exit code value for `std::process::exit()`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<&DigestError> for ExitCode {
    fn from(err: &DigestError) -> Self {
        err.to_exit_code()
    }
}
