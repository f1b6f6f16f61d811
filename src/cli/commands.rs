//! Command implementations
//!
//! Progress lines go to stdout. Errors are returned to `run`, which prints
//! them and picks the exit code.

use chrono::Local;
use std::path::Path;
use tracing::debug;

use crate::pipeline::{generate_digest, prepare_prompt};
use crate::report::{default_output_path, preview, render_digest_report, write_digest_report};
use crate::{Config, ContentBudgeter, DigestError, load_digest_request};
use digest_utils::logging::{StageTimer, log_digest_start};

const RULE_WIDTH: usize = 50;

/// Summarize the export at `input` and write the markdown report.
pub(super) fn digest_command(
    input: &Path,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), DigestError> {
    let mut timer = StageTimer::new();
    log_digest_start(
        &input.display().to_string(),
        config.model(),
        config.max_tokens(),
    );

    timer.start("load");
    let request = load_digest_request(input)?;
    timer.finish("load");
    println!(
        "✓ Loaded {} pages from {}",
        request.pages.len(),
        request.date()
    );

    timer.start("budget");
    let prepared = prepare_prompt(&request, &budgeter_for(config))?;
    timer.finish("budget");
    if prepared.usage.pages_dropped() > 0 {
        println!(
            "⚠ Only {} of {} pages fit the {} token budget",
            prepared.usage.pages_included,
            prepared.usage.pages_considered,
            prepared.usage.max_tokens
        );
    }

    let backend = digest_llm::from_config(config)?;

    timer.start("inference");
    let outcome = generate_digest(backend.as_ref(), &prepared, config.model(), &|line| {
        println!("{line}");
    })?;
    timer.finish("inference");

    let path = output.map_or_else(|| default_output_path(&prepared.date), Path::to_path_buf);
    timer.start("write");
    let report = render_digest_report(
        &prepared.date,
        &prepared.stats,
        &outcome.digest,
        Local::now(),
    );
    write_digest_report(&path, &report)?;
    timer.finish("write");
    debug!(total_ms = timer.total().as_millis(), "digest complete");

    println!("\n✓ Digest saved to: {}", path.display());
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("PREVIEW:");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", preview(&outcome.digest));

    Ok(())
}

/// Print the models the inference tool has installed.
pub(super) fn list_models_command(config: &Config) -> Result<(), DigestError> {
    let backend = digest_llm::from_config(config)?;
    let models = backend.list_models()?;
    print!("{}", format_model_list(&models, config.model()));
    Ok(())
}

fn budgeter_for(config: &Config) -> ContentBudgeter {
    ContentBudgeter::new(config.max_tokens()).with_page_content_chars(config.page_content_chars())
}

fn format_model_list(models: &[String], default_model: &str) -> String {
    let mut out = String::from("Available Ollama models:\n");
    if models.is_empty() {
        out.push_str(&format!(
            "  No models found. Run: ollama pull {default_model}\n"
        ));
    }
    for model in models {
        out.push_str(&format!("  - {model}\n"));
    }
    out
}
