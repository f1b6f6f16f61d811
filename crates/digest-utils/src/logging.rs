//! Logging for browsing-digest.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! progress lines and the digest preview the user asked for.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset and `--verbose` is given.
pub const VERBOSE_FILTER: &str = "browsing_digest=debug,digest_=debug,info";

/// Directive used when `RUST_LOG` is unset and `--verbose` is not given.
pub const QUIET_FILTER: &str = "warn";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the `verbose` flag when set. Calling this twice
/// returns an error from the second call; callers ignore it.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { QUIET_FILTER }
}

/// Wall-clock timings for the stages of one digest run.
#[derive(Debug, Default)]
pub struct StageTimer {
    started: HashMap<String, Instant>,
    finished: Vec<(String, Duration)>,
}

impl StageTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, stage: &str) {
        self.started.insert(stage.to_string(), Instant::now());
    }

    /// Stop timing `stage` and return its duration.
    ///
    /// Returns `Duration::ZERO` for a stage that was never started.
    pub fn finish(&mut self, stage: &str) -> Duration {
        let elapsed = self
            .started
            .remove(stage)
            .map_or(Duration::ZERO, |start| start.elapsed());
        debug!(stage = %stage, duration_ms = elapsed.as_millis(), "stage finished");
        self.finished.push((stage.to_string(), elapsed));
        elapsed
    }

    #[must_use]
    pub fn finished(&self) -> &[(String, Duration)] {
        &self.finished
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.finished.iter().map(|(_, d)| *d).sum()
    }
}

pub fn log_digest_start(input: &str, model: &str, max_tokens: usize) {
    info!(input = %input, model = %model, max_tokens, "starting digest");
}

pub fn log_budget(
    pages_included: usize,
    pages_considered: usize,
    tokens_used: f64,
    max_tokens: usize,
) {
    debug!(
        pages_included,
        pages_considered, tokens_used, max_tokens, "assembled browsing log"
    );
}

pub fn log_inference_complete(model: &str, duration: Duration, output_chars: usize) {
    info!(
        model = %model,
        duration_ms = duration.as_millis(),
        output_chars,
        "inference finished"
    );
}
