//! Process Command use case: the command dispatcher.
//!
//! One dispatch validates the session and the command, routes the command
//! to the rule-based or AI responder, times the work and appends exactly
//! one log entry. Rejections write nothing.
//!
//! AI failures never fail the dispatch: they are turned into a degraded
//! response text that is logged with `is_ai_response = false`.

use crate::config::DispatchParams;
use crate::ports::ai_responder::{AiFailure, AiResponder, CompletionRequest, complete_within};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use voicelog_domain::{
    CommandLogEntry, CommandLogRepository, CommandRoute, CommandText, NewCommandLogEntry,
    RuleBasedResponder, Session, SessionId, SessionRepository, StoreError, truncate_chars,
};

/// Reply when the command was only the `ai:` prefix
pub const EMPTY_AI_PROMPT: &str = "Please add a question after 'ai:'.";
/// Reply when no AI provider is configured
pub const AI_NOT_CONFIGURED: &str = "AI service not configured";
/// Reply when the provider answered with nothing
pub const AI_EMPTY_REPLY: &str = "AI service returned an empty response";

const PREVIEW_CHARS: usize = 50;

/// Errors surfaced to callers of a dispatch.
#[derive(Error, Debug)]
pub enum ProcessCommandError {
    #[error("Session not found")]
    SessionNotFound(SessionId),

    #[error("Session has ended")]
    SessionEnded(SessionId),

    #[error("Command cannot be empty")]
    EmptyCommand,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub response_text: String,
    pub is_ai_response: bool,
    pub processing_time_ms: Option<u64>,
    pub entry_id: i64,
}

impl From<CommandLogEntry> for CommandOutcome {
    fn from(entry: CommandLogEntry) -> Self {
        Self {
            response_text: entry.response_text,
            is_ai_response: entry.is_ai_response,
            processing_time_ms: entry.processing_time_ms,
            entry_id: entry.id,
        }
    }
}

/// Use case dispatching one command within a session.
#[derive(Clone)]
pub struct ProcessCommandUseCase {
    sessions: Arc<dyn SessionRepository>,
    logs: Arc<dyn CommandLogRepository>,
    responder: Arc<dyn AiResponder>,
    params: DispatchParams,
}

impl ProcessCommandUseCase {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        logs: Arc<dyn CommandLogRepository>,
        responder: Arc<dyn AiResponder>,
    ) -> Self {
        Self {
            sessions,
            logs,
            responder,
            params: DispatchParams::default(),
        }
    }

    pub fn with_params(mut self, params: DispatchParams) -> Self {
        self.params = params;
        self
    }

    /// Dispatch `raw_command` within the session.
    pub async fn execute(
        &self,
        session_id: SessionId,
        raw_command: &str,
    ) -> Result<CommandOutcome, ProcessCommandError> {
        let started = Instant::now();

        let session = self.require_active(session_id).await?;
        let command =
            CommandText::try_new(raw_command).map_err(|_| ProcessCommandError::EmptyCommand)?;

        let (response_text, is_ai_response) = match CommandRoute::classify(&command) {
            CommandRoute::Ai { prompt } => self.respond_with_ai(&prompt).await,
            CommandRoute::RuleBased => (RuleBasedResponder::respond(command.as_str()), false),
        };

        let entry = NewCommandLogEntry::new(session.id(), command.as_str(), response_text)
            .with_ai_response(is_ai_response)
            .with_processing_time_ms(elapsed_ms(started));
        let entry = self.logs.append(entry).await?;

        info!(
            session_id = %session_id,
            ai = is_ai_response,
            "Processed command: {}",
            truncate_chars(command.as_str(), PREVIEW_CHARS)
        );
        Ok(entry.into())
    }

    /// Log an exchange whose response was produced elsewhere.
    ///
    /// The session must exist and be active and the command must not be
    /// blank, exactly as for [`execute`](Self::execute). The command is
    /// stored verbatim and not classified.
    pub async fn record_exchange(
        &self,
        session_id: SessionId,
        command: &str,
        response_text: &str,
        is_ai_response: bool,
        processing_time_ms: Option<u64>,
    ) -> Result<CommandOutcome, ProcessCommandError> {
        let session = self.require_active(session_id).await?;
        if command.trim().is_empty() {
            return Err(ProcessCommandError::EmptyCommand);
        }

        let mut entry = NewCommandLogEntry::new(session.id(), command, response_text)
            .with_ai_response(is_ai_response);
        if let Some(ms) = processing_time_ms {
            entry = entry.with_processing_time_ms(ms);
        }
        let entry = self.logs.append(entry).await?;

        debug!(session_id = %session_id, entry_id = entry.id, "Recorded exchange");
        Ok(entry.into())
    }

    async fn require_active(&self, session_id: SessionId) -> Result<Session, ProcessCommandError> {
        let Some(session) = self.sessions.find(session_id).await? else {
            warn!(session_id = %session_id, "Session not found");
            return Err(ProcessCommandError::SessionNotFound(session_id));
        };
        if !session.is_active() {
            return Err(ProcessCommandError::SessionEnded(session_id));
        }
        Ok(session)
    }

    /// Ask the AI responder, degrading every failure to a logged message.
    async fn respond_with_ai(&self, prompt: &str) -> (String, bool) {
        if prompt.is_empty() {
            return (EMPTY_AI_PROMPT.to_string(), false);
        }

        let request = CompletionRequest::new(prompt, self.params.command_max_tokens);
        match complete_within(self.responder.as_ref(), &request, self.params.ai_timeout).await {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    warn!("Empty reply from AI service");
                    (AI_EMPTY_REPLY.to_string(), false)
                } else {
                    (reply.to_string(), true)
                }
            }
            Err(AiFailure::NotConfigured) => {
                warn!("AI command received but no AI service is configured");
                (AI_NOT_CONFIGURED.to_string(), false)
            }
            Err(failure) => {
                error!("AI command processing error: {}", failure);
                (format!("AI service error: {}", failure), false)
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
