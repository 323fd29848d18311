//! Rule-based responder
//!
//! A fixed, ordered policy table matched by case-insensitive substring.
//! The first matching rule wins; unmatched commands get the fallback.

use chrono::{NaiveTime, Utc};

pub const GREETING: &str = "Hello! How can I assist you today?";
pub const HELP: &str = "I can help you with basic commands. Try saying 'hello', 'time', or prefix with 'ai:' for AI responses.";
pub const FALLBACK: &str =
    "I'm not sure how to respond to that yet. Try saying 'help' for available commands.";

/// Reply kinds in the policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleReply {
    Greeting,
    CurrentTime,
    Help,
    Fallback,
}

/// Policy table, evaluated top to bottom
const RULES: &[(&str, RuleReply)] = &[
    ("hello", RuleReply::Greeting),
    ("time", RuleReply::CurrentTime),
    ("help", RuleReply::Help),
];

/// Answers commands that were not routed to the AI responder.
///
/// Never fails and never produces an AI-generated response.
pub struct RuleBasedResponder;

impl RuleBasedResponder {
    /// Find the first rule matching `command`.
    pub fn match_rule(command: &str) -> RuleReply {
        let lowered = command.to_lowercase();
        RULES
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, reply)| *reply)
            .unwrap_or(RuleReply::Fallback)
    }

    /// Respond using the current UTC time.
    pub fn respond(command: &str) -> String {
        Self::respond_at(command, Utc::now().time())
    }

    /// Respond as if the wall clock showed `now`.
    pub fn respond_at(command: &str, now: NaiveTime) -> String {
        match Self::match_rule(command) {
            RuleReply::Greeting => GREETING.to_string(),
            RuleReply::CurrentTime => format!("The current time is {}", now.format("%H:%M:%S")),
            RuleReply::Help => HELP.to_string(),
            RuleReply::Fallback => FALLBACK.to_string(),
        }
    }
}
