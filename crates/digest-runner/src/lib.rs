//! Process execution for the external inference tool
//!
//! Every command the digest pipeline runs goes through [`CommandSpec`] and a
//! [`ProcessRunner`]. Arguments are passed as discrete argv elements; no shell
//! is ever involved, so model names and prompt text cannot be interpreted as
//! shell syntax.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
