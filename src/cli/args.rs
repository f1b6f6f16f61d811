//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

/// browsing-digest - summarize a day of browsing with a local model
#[derive(Parser, Debug)]
#[command(name = "browsing-digest")]
#[command(about = "Generate a markdown digest of a browsing-history export using a local Ollama model")]
#[command(long_about = r#"
browsing-digest reads a JSON export of the pages you visited, orders them by
visit time, fits as many as the token budget allows into a prompt, and asks a
locally installed model to write a short digest. Nothing leaves your machine.

EXAMPLES:
  # Summarize an export with the default model
  browsing-digest history-2025-01-15.json

  # Use another model and choose the output file
  browsing-digest history.json --model mistral --output today.md

  # Show the models Ollama has installed
  browsing-digest --list-models
"#)]
#[command(version)]
pub struct Cli {
    /// Browsing-history export (.json)
    #[arg(value_name = "INPUT_FILE", required_unless_present = "list_models")]
    pub input_file: Option<PathBuf>,

    /// Ollama model to use (default: llama3.2)
    #[arg(short, long, value_name = "NAME")]
    pub model: Option<String>,

    /// Where to write the digest (default: digest-<date>.md)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// List installed Ollama models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Path to a config file (default: discover .browsing-digest/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Token budget for the browsing log in the prompt (default: 4000)
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Timeout in seconds for the model run (default: 120)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path or name of the ollama executable
    #[arg(long, value_name = "PATH")]
    pub ollama_binary: Option<String>,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Build the clap command, for help rendering and completion generation.
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
