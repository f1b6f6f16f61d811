//! Error types for runner module

use thiserror::Error;

/// Process execution errors
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn '{program}': {reason}")]
    SpawnFailed {
        program: String,
        reason: String,
        not_found: bool,
    },

    #[error("Failed to wait for '{program}': {reason}")]
    WaitFailed { program: String, reason: String },

    #[error("'{program}' timed out after {timeout_seconds} seconds")]
    Timeout {
        program: String,
        timeout_seconds: u64,
    },
}

impl RunnerError {
    /// True when the program could not be located at all.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SpawnFailed { not_found: true, .. })
    }
}
