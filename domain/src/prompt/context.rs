//! Screen context: externally supplied UI text, capped to a character budget.

use crate::util::truncate_chars;

/// Default character budget for screen text embedded in a prompt
pub const DEFAULT_CONTEXT_BUDGET_CHARS: usize = 1500;

/// Screen text after applying the budget (Value Object)
///
/// Text over the budget is cut silently; it is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenContext {
    text: String,
    original_chars: usize,
}

impl ScreenContext {
    pub fn new(raw: &str, budget_chars: usize) -> Self {
        Self {
            text: truncate_chars(raw, budget_chars).to_string(),
            original_chars: raw.chars().count(),
        }
    }

    pub fn with_default_budget(raw: &str) -> Self {
        Self::new(raw, DEFAULT_CONTEXT_BUDGET_CHARS)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Characters kept after truncation
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn was_truncated(&self) -> bool {
        self.char_len() < self.original_chars
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
