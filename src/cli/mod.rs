//! Command-line interface for browsing-digest
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions (clap)
//! - `run`: entry point, configuration and dispatch
//! - `commands`: the digest and list-models commands

pub mod args;
mod commands;
mod run;

pub use args::{Cli, build_cli};
pub use run::run;
