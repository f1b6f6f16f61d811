//! Digest pipeline: budget the export into a prompt, then run the model.
//!
//! The content steps never touch the inference tool, so an unusable export
//! is reported even when Ollama is missing.

use std::time::Instant;

use digest_llm::{InferenceBackend, ModelStatus, ensure_model};
use digest_packet::{
    BudgetUsage, ContentBudgeter, DigestRequest, DigestStats, build_digest_prompt,
};
use digest_utils::logging::{log_budget, log_inference_complete};

use crate::DigestError;

/// A prompt ready for the inference tool.
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub date: String,
    pub prompt: String,
    pub stats: DigestStats,
    pub usage: BudgetUsage,
}

/// Result of a completed model run.
#[derive(Debug, Clone)]
pub struct DigestOutcome {
    pub digest: String,
    pub model_status: ModelStatus,
}

/// Reject an export with no pages.
pub fn validate_request(request: &DigestRequest) -> Result<(), DigestError> {
    if request.is_empty() {
        return Err(DigestError::EmptyPageList);
    }
    Ok(())
}

/// Budget the export's pages and wrap them in the digest instructions.
///
/// # Errors
///
/// * `DigestError::EmptyPageList` - the export has no pages
/// * `DigestError::EmptyPrompt` - not even the first page fits the budget
pub fn prepare_prompt(
    request: &DigestRequest,
    budgeter: &ContentBudgeter,
) -> Result<PreparedPrompt, DigestError> {
    validate_request(request)?;

    let budgeted = budgeter.budget(&request.pages);
    let usage = budgeted.usage.clone();
    log_budget(
        usage.pages_included,
        usage.pages_considered,
        usage.tokens_used(),
        usage.max_tokens,
    );

    if budgeted.is_empty() {
        return Err(DigestError::EmptyPrompt);
    }

    Ok(PreparedPrompt {
        date: request.date().to_string(),
        prompt: build_digest_prompt(&budgeted.content, request.date()),
        stats: request.stats(),
        usage,
    })
}

/// Check the backend, make sure `model` is present, and run it on the prompt.
///
/// `progress` receives one line per user-visible step.
pub fn generate_digest(
    backend: &dyn InferenceBackend,
    prepared: &PreparedPrompt,
    model: &str,
    progress: &dyn Fn(&str),
) -> Result<DigestOutcome, DigestError> {
    backend.check_available()?;
    progress(&format!("✓ {} is running", display_name(backend)));

    let model_status = ensure_model(backend, model);
    match &model_status {
        ModelStatus::Installed => {}
        ModelStatus::Pulled => progress(&format!("✓ Pulled model '{model}'")),
        ModelStatus::PullFailed(reason) => {
            progress(&format!("✗ Could not pull model '{model}': {reason}"));
        }
    }

    progress(&format!(
        "Generating digest with {model}... (this may take 30-60 seconds)"
    ));
    let started = Instant::now();
    let digest = backend.run_model(model, &prepared.prompt)?;
    log_inference_complete(model, started.elapsed(), digest.chars().count());

    Ok(DigestOutcome {
        digest,
        model_status,
    })
}

fn display_name(backend: &dyn InferenceBackend) -> String {
    let name = backend.name();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_llm::LlmError;
    use digest_packet::PageRecord;
    use std::cell::RefCell;
    use std::time::Duration;

    fn page(timestamp: &str, title: &str) -> PageRecord {
        PageRecord {
            title: Some(title.to_string()),
            domain: Some("example.com".to_string()),
            content: Some("body".to_string()),
            timestamp: Some(timestamp.to_string()),
            reading_time: Some(2),
            ..PageRecord::default()
        }
    }

    fn request(pages: Vec<PageRecord>) -> DigestRequest {
        DigestRequest {
            date: Some("2025-01-19".to_string()),
            pages,
            total_pages: None,
        }
    }

    struct RecordingBackend {
        available: bool,
        run_result: RefCell<Option<Result<String, LlmError>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl RecordingBackend {
        fn new(run_result: Result<String, LlmError>) -> Self {
            Self {
                available: true,
                run_result: RefCell::new(Some(run_result)),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl InferenceBackend for RecordingBackend {
        fn name(&self) -> &str {
            "ollama"
        }

        fn check_available(&self) -> Result<(), LlmError> {
            if self.available {
                Ok(())
            } else {
                Err(LlmError::NotRunning(String::new()))
            }
        }

        fn list_models(&self) -> Result<Vec<String>, LlmError> {
            Ok(vec!["llama3.2:latest".to_string()])
        }

        fn pull_model(&self, _model: &str) -> Result<(), LlmError> {
            Ok(())
        }

        fn run_model(&self, _model: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.run_result
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    #[test]
    fn test_prepare_prompt_rejects_empty_export() {
        let err = prepare_prompt(&request(vec![]), &ContentBudgeter::default()).unwrap_err();
        assert!(matches!(err, DigestError::EmptyPageList));
    }

    #[test]
    fn test_prepare_prompt_rejects_budget_too_small() {
        let err = prepare_prompt(
            &request(vec![page("2025-01-19T08:00:00Z", "A")]),
            &ContentBudgeter::new(1),
        )
        .unwrap_err();
        assert!(matches!(err, DigestError::EmptyPrompt));
    }

    #[test]
    fn test_prepare_prompt_orders_pages_and_collects_stats() {
        let prepared = prepare_prompt(
            &request(vec![
                page("2025-01-19T09:00:00Z", "A"),
                page("2025-01-19T08:00:00Z", "B"),
            ]),
            &ContentBudgeter::default(),
        )
        .unwrap();

        assert!(prepared.prompt.contains("visited on 2025-01-19"));
        assert!(prepared.prompt.find("[08:00] B").unwrap() < prepared.prompt.find("[09:00] A").unwrap());
        assert_eq!(prepared.stats.total_pages, 2);
        assert_eq!(prepared.stats.total_reading_time, 4);
        assert_eq!(prepared.usage.pages_included, 2);
    }

    #[test]
    fn test_generate_digest_runs_model_on_prompt() {
        let prepared = prepare_prompt(
            &request(vec![page("2025-01-19T08:00:00Z", "A")]),
            &ContentBudgeter::default(),
        )
        .unwrap();
        let backend = RecordingBackend::new(Ok("Your day in review.".to_string()));
        let lines = RefCell::new(Vec::new());

        let outcome = generate_digest(&backend, &prepared, "llama3.2", &|line| {
            lines.borrow_mut().push(line.to_string());
        })
        .unwrap();

        assert_eq!(outcome.digest, "Your day in review.");
        assert_eq!(outcome.model_status, ModelStatus::Installed);
        assert_eq!(backend.prompts.borrow()[0], prepared.prompt);
        assert_eq!(lines.borrow()[0], "✓ Ollama is running");
    }

    #[test]
    fn test_generate_digest_not_running() {
        let prepared = prepare_prompt(
            &request(vec![page("2025-01-19T08:00:00Z", "A")]),
            &ContentBudgeter::default(),
        )
        .unwrap();
        let mut backend = RecordingBackend::new(Ok(String::new()));
        backend.available = false;

        let err = generate_digest(&backend, &prepared, "llama3.2", &|_| {}).unwrap_err();
        assert!(matches!(err, DigestError::Llm(LlmError::NotRunning(_))));
        assert!(backend.prompts.borrow().is_empty());
    }

    #[test]
    fn test_generate_digest_timeout_propagates() {
        let prepared = prepare_prompt(
            &request(vec![page("2025-01-19T08:00:00Z", "A")]),
            &ContentBudgeter::default(),
        )
        .unwrap();
        let backend = RecordingBackend::new(Err(LlmError::Timeout {
            duration: Duration::from_secs(120),
        }));

        let err = generate_digest(&backend, &prepared, "llama3.2", &|_| {}).unwrap_err();
        assert_eq!(err.to_exit_code(), crate::ExitCode::INFERENCE_TIMEOUT);
    }
}
