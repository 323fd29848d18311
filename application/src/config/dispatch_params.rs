//! Dispatch parameters: limits and budgets for the command and ask flows.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use voicelog_domain::DEFAULT_CONTEXT_BUDGET_CHARS;

/// Input limits and AI budgets used by the use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchParams {
    /// Maximum accepted command length, in characters.
    pub max_command_chars: usize,
    /// Character budget for screen text embedded in a prompt.
    pub context_budget_chars: usize,
    /// Output token cap for `ai:` commands.
    pub command_max_tokens: u32,
    /// Output token cap for context-aware questions.
    pub ask_max_tokens: u32,
    /// Upper bound on a single AI call.
    pub ai_timeout: Option<Duration>,
}

impl Default for DispatchParams {
    fn default() -> Self {
        Self {
            max_command_chars: 1000,
            context_budget_chars: DEFAULT_CONTEXT_BUDGET_CHARS,
            command_max_tokens: 150,
            ask_max_tokens: 300,
            ai_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl DispatchParams {
    // ==================== Builder Methods ====================

    pub fn with_max_command_chars(mut self, max: usize) -> Self {
        self.max_command_chars = max;
        self
    }

    pub fn with_context_budget_chars(mut self, budget: usize) -> Self {
        self.context_budget_chars = budget;
        self
    }

    pub fn with_command_max_tokens(mut self, tokens: u32) -> Self {
        self.command_max_tokens = tokens;
        self
    }

    pub fn with_ask_max_tokens(mut self, tokens: u32) -> Self {
        self.ask_max_tokens = tokens;
        self
    }

    pub fn with_ai_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ai_timeout = timeout;
        self
    }
}
