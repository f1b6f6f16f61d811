use crate::BudgetUsage;
use crate::model::PageRecord;
use crate::render::format_page_block;
use tracing::debug;

/// Default token budget for the browsing log.
pub const DEFAULT_MAX_TOKENS: usize = 4000;

/// Default number of content characters kept per page.
pub const DEFAULT_PAGE_CONTENT_CHARS: usize = 1000;

/// Browsing log text plus the budget accounting that produced it.
#[derive(Debug, Clone)]
pub struct BudgetedContent {
    /// Newline-joined page blocks, oldest first.
    pub content: String,
    pub usage: BudgetUsage,
}

impl BudgetedContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Packs page blocks into an approximate token budget.
///
/// Pages are stably sorted by timestamp string, rendered one block each, and
/// appended until the next block would push the estimate over the budget.
/// Packing stops at the first block that does not fit; later, smaller pages
/// are not considered.
#[derive(Debug, Clone, Copy)]
pub struct ContentBudgeter {
    max_tokens: usize,
    page_content_chars: usize,
}

impl Default for ContentBudgeter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

impl ContentBudgeter {
    #[must_use]
    pub const fn new(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            page_content_chars: DEFAULT_PAGE_CONTENT_CHARS,
        }
    }

    #[must_use]
    pub const fn with_page_content_chars(mut self, page_content_chars: usize) -> Self {
        self.page_content_chars = page_content_chars;
        self
    }

    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    #[must_use]
    pub const fn page_content_chars(&self) -> usize {
        self.page_content_chars
    }

    pub fn budget(&self, pages: &[PageRecord]) -> BudgetedContent {
        let mut ordered: Vec<&PageRecord> = pages.iter().collect();
        ordered.sort_by(|a, b| a.timestamp().cmp(b.timestamp()));

        let mut usage = BudgetUsage::new(self.max_tokens, pages.len());
        let mut blocks = Vec::new();

        for page in ordered {
            let block = format_page_block(page, self.page_content_chars);
            let block_chars = block.chars().count();
            if usage.would_exceed(block_chars) {
                debug!(
                    title = %page.title(),
                    block_chars,
                    chars_used = usage.chars_used,
                    "token budget reached"
                );
                break;
            }
            usage.add_block(block_chars);
            blocks.push(block);
        }

        BudgetedContent {
            content: blocks.join("\n"),
            usage,
        }
    }
}
