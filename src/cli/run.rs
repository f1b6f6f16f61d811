//! CLI entry point and dispatch

use clap::Parser;

use super::args::Cli;
use super::commands;
use crate::{CliArgs, Config, DigestError, ExitCode};
use digest_utils::logging::init_tracing;

/// Main CLI execution function.
///
/// Handles ALL output including errors. On failure the user-facing report is
/// already on stderr and only the exit code is returned; main.rs does not
/// print.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();

    let config = match Config::discover(&cli_args(&cli)) {
        Ok(config) => config,
        Err(err) => return Err(report_error(&DigestError::Config(err))),
    };

    // A second subscriber (tests calling run twice) is not an error worth reporting
    let _ = init_tracing(config.verbose());
    config.log_effective_config();

    let result = if cli.list_models {
        commands::list_models_command(&config)
    } else {
        match cli.input_file.as_deref() {
            Some(input) => commands::digest_command(input, cli.output.as_deref(), &config),
            // clap enforces INPUT_FILE unless --list-models is given
            None => return Err(ExitCode::CLI_ARGS),
        }
    };

    result.map_err(|err| report_error(&err))
}

fn cli_args(cli: &Cli) -> CliArgs {
    CliArgs {
        config_path: cli.config.clone(),
        model: cli.model.clone(),
        max_tokens: cli.max_tokens,
        run_timeout_secs: cli.timeout,
        ollama_binary: cli.ollama_binary.clone(),
        verbose: cli.verbose.then_some(true),
    }
}

fn report_error(err: &DigestError) -> ExitCode {
    tracing::debug!(error = ?err, "command failed");
    eprint!("{}", err.display_for_user());
    err.to_exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_leave_unset_flags_to_lower_layers() {
        let cli = Cli::try_parse_from(["browsing-digest", "history.json"]).unwrap();
        let args = cli_args(&cli);

        assert!(args.model.is_none());
        assert!(args.max_tokens.is_none());
        assert!(args.run_timeout_secs.is_none());
        assert!(args.verbose.is_none());
    }

    #[test]
    fn test_cli_args_carry_flags() {
        let cli = Cli::try_parse_from([
            "browsing-digest",
            "history.json",
            "--model",
            "phi3",
            "--timeout",
            "30",
            "--verbose",
        ])
        .unwrap();
        let args = cli_args(&cli);

        assert_eq!(args.model.as_deref(), Some("phi3"));
        assert_eq!(args.run_timeout_secs, Some(30));
        assert_eq!(args.verbose, Some(true));
    }
}
