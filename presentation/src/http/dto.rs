//! Request and response bodies of the HTTP API

use super::error::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use voicelog_application::{AskAiInput, AskAiOutput, SessionSummary};
use voicelog_domain::{Session, SessionId};

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            is_active: session.is_active(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub message: &'static str,
    pub data: SessionView,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SessionSummaryView {
    #[serde(flatten)]
    pub session: SessionView,
    pub total_commands: usize,
}

impl From<&SessionSummary> for SessionSummaryView {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            session: SessionView::from(&summary.session),
            total_commands: summary.total_commands,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummaryView>,
}

/// Body of `send-command`. Fields are optional so that missing ones are
/// reported per field instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendCommandRequest {
    pub session_id: Option<String>,
    pub command: Option<String>,
}

/// A validated `send-command` body.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidCommand {
    pub session_id: SessionId,
    pub command: String,
}

impl SendCommandRequest {
    pub fn validate(self, max_command_chars: usize) -> Result<ValidCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let session_id = match self.session_id.as_deref() {
            None => {
                errors.insert("session_id", vec![REQUIRED.to_string()]);
                None
            }
            Some(raw) => match raw.parse::<SessionId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.insert("session_id", vec!["Must be a valid UUID.".to_string()]);
                    None
                }
            },
        };

        let command = match self.command.as_deref().map(str::trim) {
            None => {
                errors.insert("command", vec![REQUIRED.to_string()]);
                None
            }
            Some("") => {
                errors.insert("command", vec!["Command cannot be empty".to_string()]);
                None
            }
            Some(text) if text.chars().count() > max_command_chars => {
                errors.insert(
                    "command",
                    vec![format!(
                        "Ensure this field has no more than {} characters.",
                        max_command_chars
                    )],
                );
                None
            }
            Some(text) => Some(text.to_string()),
        };

        match (session_id, command) {
            (Some(session_id), Some(command)) if errors.is_empty() => Ok(ValidCommand {
                session_id,
                command,
            }),
            _ => Err(errors),
        }
    }
}

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Serialize)]
pub struct SendCommandResponse {
    pub response: String,
}

/// Body of `ask-ai`. Every field defaults to empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AskAiRequest {
    pub user_input: Option<String>,
    pub screen_text: Option<String>,
    pub session_id: Option<String>,
}

impl AskAiRequest {
    /// Convert to use case input.
    ///
    /// A blank `session_id` means no logging. A malformed one is handed back
    /// next to the input so the caller can warn and carry on.
    pub fn into_input(self) -> (AskAiInput, Option<String>) {
        let mut input = AskAiInput::new(
            self.user_input.unwrap_or_default(),
            self.screen_text.unwrap_or_default(),
        );

        let raw = self
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let mut rejected = None;
        if let Some(raw) = raw {
            match raw.parse::<SessionId>() {
                Ok(id) => input = input.with_session(id),
                Err(_) => rejected = Some(raw),
            }
        }
        (input, rejected)
    }
}

#[derive(Debug, Serialize)]
pub struct AskAiResponse {
    pub response: String,
    pub user_input: String,
    pub screen_context_length: usize,
}

impl From<AskAiOutput> for AskAiResponse {
    fn from(output: AskAiOutput) -> Self {
        Self {
            response: output.response_text,
            user_input: output.user_input,
            screen_context_length: output.truncated_context_length,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
