//! Prompt construction for browsing digests.
//!
//! This crate turns a browsing-history export into the text sent to the
//! inference tool: it loads and models the export, formats each visited page
//! as a block, and greedily packs blocks into an approximate token budget.

mod budget;
mod builder;
mod loader;
mod model;
mod prompt;
mod render;

/// Information about token budget usage for one budgeting pass.
///
/// Usage is tracked in characters and converted to estimated tokens with
/// [`estimate_tokens`]. Characters are counted as Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetUsage {
    /// Characters of the blocks appended so far.
    pub chars_used: usize,
    /// Blocks appended so far.
    pub pages_included: usize,
    /// Pages handed to the budgeter.
    pub pages_considered: usize,
    /// Maximum estimated tokens allowed.
    pub max_tokens: usize,
}

impl BudgetUsage {
    /// Create a new budget tracker.
    #[must_use]
    pub const fn new(max_tokens: usize, pages_considered: usize) -> Self {
        Self {
            chars_used: 0,
            pages_included: 0,
            pages_considered,
            max_tokens,
        }
    }

    /// Check if a block of `block_chars` characters would push the estimate over budget.
    #[must_use]
    pub const fn would_exceed(&self, block_chars: usize) -> bool {
        budget::chars_exceed_tokens(self.chars_used.saturating_add(block_chars), self.max_tokens)
    }

    /// Record an appended block.
    pub const fn add_block(&mut self, block_chars: usize) {
        self.chars_used += block_chars;
        self.pages_included += 1;
    }

    /// Estimated tokens used by the appended blocks.
    #[must_use]
    pub fn tokens_used(&self) -> f64 {
        estimate_tokens(self.chars_used)
    }

    /// Pages that did not make it into the content.
    #[must_use]
    pub const fn pages_dropped(&self) -> usize {
        self.pages_considered.saturating_sub(self.pages_included)
    }

    /// Check if budget is exceeded.
    #[must_use]
    pub const fn is_exceeded(&self) -> bool {
        budget::chars_exceed_tokens(self.chars_used, self.max_tokens)
    }
}

pub use budget::{TOKENS_PER_CHAR, estimate_tokens};
pub use builder::{
    BudgetedContent, ContentBudgeter, DEFAULT_MAX_TOKENS, DEFAULT_PAGE_CONTENT_CHARS,
};
pub use loader::{load_digest_request, parse_digest_request};
pub use model::{
    DEFAULT_DATE, DEFAULT_DOMAIN, DEFAULT_TITLE, DigestRequest, DigestStats, PageRecord,
};
pub use prompt::build_digest_prompt;
pub use render::{UNKNOWN_TIME, clip_content, format_page_block, format_time_label};
