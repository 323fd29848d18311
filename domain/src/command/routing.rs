//! Command classification
//!
//! A command starting with `ai:` (any case) goes to the AI responder with
//! the prefix stripped; everything else goes to the rule-based responder.

use super::value_objects::CommandText;

/// Case-insensitive prefix marking an AI-directed command
pub const AI_PREFIX: &str = "ai:";

/// Where a command should be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRoute {
    /// Send `prompt` to the AI responder. The prompt may be empty when the
    /// command was the bare prefix.
    Ai { prompt: String },
    /// Answer from the fixed policy table
    RuleBased,
}

impl CommandRoute {
    pub fn classify(command: &CommandText) -> Self {
        let text = command.as_str();
        match text.get(..AI_PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(AI_PREFIX) => CommandRoute::Ai {
                prompt: text[AI_PREFIX.len()..].trim().to_string(),
            },
            _ => CommandRoute::RuleBased,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, CommandRoute::Ai { .. })
    }
}
