//! browsing-digest - a daily digest of your browsing history, written by a
//! local model
//!
//! The tool reads a browsing-history export (JSON), orders the pages by visit
//! time, fits as many of them as a token budget allows into a prompt, and asks
//! a locally installed model (through the `ollama` command-line tool) to write
//! a short markdown digest of the day.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Summarize an export with the default model (llama3.2)
//! browsing-digest history-2025-01-15.json
//!
//! # Pick a model and an output file
//! browsing-digest history.json --model mistral --output today.md
//!
//! # Show the models ollama has installed
//! browsing-digest --list-models
//! ```
//!
//! # Library use
//!
//! The pipeline is split so that the content steps can run without a model:
//!
//! - [`load_digest_request`] parses the export
//! - [`pipeline::prepare_prompt`] orders, clips and budgets the pages
//! - [`pipeline::generate_digest`] drives any [`InferenceBackend`]
//! - [`report::render_digest_report`] lays out the markdown report
//!
//! Errors are [`DigestError`] values; [`DigestError::to_exit_code`] maps them
//! to the CLI's [`ExitCode`].

pub mod cli;
pub mod pipeline;
pub mod report;

pub use digest_config::{CliArgs, Config, ConfigBuilder, ConfigSource};
pub use digest_llm::{InferenceBackend, ModelStatus, OllamaCliBackend};
pub use digest_packet::{
    BudgetUsage, BudgetedContent, ContentBudgeter, DigestRequest, DigestStats, PageRecord,
    build_digest_prompt, load_digest_request,
};
pub use digest_utils::error::{
    ConfigError, DigestError, InputError, LlmError, UserFriendlyError,
};
pub use digest_utils::exit_codes::ExitCode;
