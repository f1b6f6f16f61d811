//! Token estimation.
//!
//! The estimate is a fixed ratio, not a tokenizer: a quarter token per
//! character. Since the ratio is exactly representable, budget checks are
//! done in whole characters (`chars > 4 * max_tokens`) and never drift.

/// Estimated tokens per character.
pub const TOKENS_PER_CHAR: f64 = 0.25;

const CHARS_PER_TOKEN: usize = 4;

/// Estimated token count for `chars` characters of text.
#[must_use]
pub fn estimate_tokens(chars: usize) -> f64 {
    chars as f64 * TOKENS_PER_CHAR
}

/// `true` when `chars` characters are estimated above `max_tokens`.
pub(crate) const fn chars_exceed_tokens(chars: usize, max_tokens: usize) -> bool {
    chars > max_tokens.saturating_mul(CHARS_PER_TOKEN)
}
