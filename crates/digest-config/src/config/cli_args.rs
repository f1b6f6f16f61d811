use std::path::PathBuf;

/// Configuration values supplied on the command line.
///
/// `None` means "not given"; lower layers then decide.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub model: Option<String>,
    pub max_tokens: Option<usize>,
    pub run_timeout_secs: Option<u64>,
    pub ollama_binary: Option<String>,
    pub verbose: Option<bool>,
}
