//! Ask AI use case.
//!
//! Context-aware pass-through to the AI responder, independent of command
//! classification:
//! 1. Reject an empty question before touching the AI boundary
//! 2. Cap the screen text to the context budget
//! 3. Build the screen-aware prompt and call the responder
//! 4. On success, best-effort log the exchange into the given session
//!
//! AI failures are returned as [`AskAiError::Ai`]; each carries a canned
//! fallback message for the caller.

use crate::config::DispatchParams;
use crate::ports::ai_responder::{AiFailure, AiResponder, CompletionRequest, complete_within};
use crate::use_cases::process_command::ProcessCommandUseCase;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};
use voicelog_domain::{PromptTemplate, ScreenContext, SessionId, truncate_chars};

/// Reply when the provider answered with nothing
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm sorry, I couldn't generate a response. Please try asking your question again.";

/// Prefix of the command text logged for an ask interaction
pub const ANALYSIS_LOG_PREFIX: &str = "AI Analysis: ";

const PREVIEW_CHARS: usize = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AskAiError {
    #[error("User input is required")]
    EmptyInput,

    #[error(transparent)]
    Ai(#[from] AiFailure),
}

impl AskAiError {
    /// Human-readable message to show instead of an answer.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            AskAiError::EmptyInput => "Please enter a question.",
            AskAiError::Ai(AiFailure::RateLimited(_)) => {
                "I'm receiving too many requests right now. Please wait a moment and try again."
            }
            AskAiError::Ai(AiFailure::InvalidRequest(_)) => {
                "I'm having trouble processing your request. Please try rephrasing your question."
            }
            AskAiError::Ai(AiFailure::NotConfigured | AiFailure::AuthFailed(_)) => {
                "AI service is currently unavailable. Please contact support."
            }
            AskAiError::Ai(AiFailure::ServiceError(_)) => {
                "I'm experiencing technical difficulties. Please try again in a moment."
            }
        }
    }
}

/// Input for the [`AskAiUseCase`].
#[derive(Debug, Clone, Default)]
pub struct AskAiInput {
    pub user_input: String,
    pub screen_text: String,
    pub session_id: Option<SessionId>,
}

impl AskAiInput {
    pub fn new(user_input: impl Into<String>, screen_text: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            screen_text: screen_text.into(),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// Output of a successful ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskAiOutput {
    pub response_text: String,
    pub user_input: String,
    /// Characters of screen text actually sent, `min(len, budget)`.
    pub truncated_context_length: usize,
    /// Whether the exchange was written to the session's log.
    pub logged: bool,
}

/// Use case for context-aware AI questions.
#[derive(Clone)]
pub struct AskAiUseCase {
    responder: Arc<dyn AiResponder>,
    command_log: Option<Arc<ProcessCommandUseCase>>,
    params: DispatchParams,
}

impl AskAiUseCase {
    pub fn new(responder: Arc<dyn AiResponder>) -> Self {
        Self {
            responder,
            command_log: None,
            params: DispatchParams::default(),
        }
    }

    /// Log successful exchanges through the command dispatcher.
    pub fn with_command_log(mut self, dispatcher: Arc<ProcessCommandUseCase>) -> Self {
        self.command_log = Some(dispatcher);
        self
    }

    pub fn with_params(mut self, params: DispatchParams) -> Self {
        self.params = params;
        self
    }

    pub async fn execute(&self, input: AskAiInput) -> Result<AskAiOutput, AskAiError> {
        let started = Instant::now();

        // Only the emptiness check trims; the question is sent and echoed as typed.
        let user_input = input.user_input.as_str();
        if user_input.trim().is_empty() {
            warn!("Empty user input received");
            return Err(AskAiError::EmptyInput);
        }

        let context = ScreenContext::new(&input.screen_text, self.params.context_budget_chars);
        let prompt = PromptTemplate::screen_question(&context, user_input);
        let request = CompletionRequest::new(prompt, self.params.ask_max_tokens)
            .with_system_context(PromptTemplate::screen_assistant_system());

        info!(
            "Calling AI service for user input: '{}' (screen text length: {})",
            truncate_chars(user_input, PREVIEW_CHARS),
            context.char_len()
        );

        let reply = complete_within(self.responder.as_ref(), &request, self.params.ai_timeout)
            .await
            .map_err(|failure| {
                error!("AI service error during ask: {}", failure);
                AskAiError::Ai(failure)
            })?;

        let reply = reply.trim();
        if reply.is_empty() {
            warn!("Empty response from AI service");
            return Ok(AskAiOutput {
                response_text: EMPTY_REPLY_FALLBACK.to_string(),
                user_input: user_input.to_string(),
                truncated_context_length: context.char_len(),
                logged: false,
            });
        }

        let logged = match input.session_id {
            Some(session_id) => {
                let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                self.log_exchange(session_id, user_input, reply, elapsed).await
            }
            None => false,
        };

        info!(
            "AI response generated successfully for: '{}'",
            truncate_chars(user_input, PREVIEW_CHARS)
        );

        Ok(AskAiOutput {
            response_text: reply.to_string(),
            user_input: user_input.to_string(),
            truncated_context_length: context.char_len(),
            logged,
        })
    }

    /// Never fails the ask; problems are only logged.
    async fn log_exchange(
        &self,
        session_id: SessionId,
        user_input: &str,
        reply: &str,
        elapsed_ms: u64,
    ) -> bool {
        let Some(dispatcher) = &self.command_log else {
            return false;
        };
        let command = format!("{}{}", ANALYSIS_LOG_PREFIX, user_input);
        match dispatcher
            .record_exchange(session_id, &command, reply, true, Some(elapsed_ms))
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!(session_id = %session_id, "Failed to log AI interaction: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemoryStore, ScriptedResponder};
    use chrono::Utc;
    use voicelog_domain::{Session, SessionRepository};

    #[tokio::test]
    async fn test_empty_input_skips_ai() {
        let responder = Arc::new(ScriptedResponder::replying("unused"));
        let use_case = AskAiUseCase::new(responder.clone());

        let err = use_case
            .execute(AskAiInput::new("   ", "screen"))
            .await
            .unwrap_err();

        assert_eq!(err, AskAiError::EmptyInput);
        assert!(responder.requests().is_empty());
    }

    #[tokio::test]
    async fn test_screen_text_is_truncated_to_budget() {
        let responder = Arc::new(ScriptedResponder::replying("Use the menu."));
        let use_case = AskAiUseCase::new(responder.clone());
        let screen = format!("{}{}", "s".repeat(1500), "OVERFLOW");

        let output = use_case
            .execute(AskAiInput::new("Where is billing?", screen))
            .await
            .unwrap();

        assert_eq!(output.truncated_context_length, 1500);
        assert_eq!(output.response_text, "Use the menu.");
        assert_eq!(output.user_input, "Where is billing?");

        let requests = responder.requests();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].prompt.contains("OVERFLOW"));
        assert!(requests[0].prompt.contains("Where is billing?"));
        assert_eq!(requests[0].max_output_tokens, 300);
        assert_eq!(
            requests[0].system_context.as_deref(),
            Some(PromptTemplate::screen_assistant_system())
        );
    }

    #[tokio::test]
    async fn test_question_is_sent_and_echoed_untrimmed() {
        let store = Arc::new(MemoryStore::default());
        let responder = Arc::new(ScriptedResponder::replying("Top left."));
        let dispatcher = Arc::new(ProcessCommandUseCase::new(
            store.clone(),
            store.clone(),
            responder.clone(),
        ));
        let use_case = AskAiUseCase::new(responder.clone()).with_command_log(dispatcher);
        let session = Session::start(Utc::now());
        store.insert(&session).await.unwrap();

        let output = use_case
            .execute(AskAiInput::new("  where is save?\n", "").with_session(session.id()))
            .await
            .unwrap();

        assert_eq!(output.user_input, "  where is save?\n");
        assert!(responder.requests()[0].prompt.contains("  where is save?\n"));
        assert_eq!(
            store.entries()[0].command_text,
            "AI Analysis:   where is save?\n"
        );
    }

    #[tokio::test]
    async fn test_short_context_length_is_reported() {
        let responder = Arc::new(ScriptedResponder::replying("ok"));
        let use_case = AskAiUseCase::new(responder);

        let output = use_case
            .execute(AskAiInput::new("q", "twelve chars"))
            .await
            .unwrap();
        assert_eq!(output.truncated_context_length, 12);
    }

    #[tokio::test]
    async fn test_failures_are_typed() {
        let cases = vec![
            AiFailure::NotConfigured,
            AiFailure::RateLimited("429".to_string()),
            AiFailure::InvalidRequest("bad".to_string()),
            AiFailure::AuthFailed("401".to_string()),
            AiFailure::ServiceError("503".to_string()),
        ];
        for failure in cases {
            let use_case = AskAiUseCase::new(Arc::new(ScriptedResponder::failing(failure.clone())));
            let err = use_case
                .execute(AskAiInput::new("question", ""))
                .await
                .unwrap_err();
            assert_eq!(err, AskAiError::Ai(failure));
            assert!(!err.fallback_message().is_empty());
        }
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(
            AskAiError::Ai(AiFailure::RateLimited(String::new())).fallback_message(),
            "I'm receiving too many requests right now. Please wait a moment and try again."
        );
        assert_eq!(
            AskAiError::Ai(AiFailure::NotConfigured).fallback_message(),
            AskAiError::Ai(AiFailure::AuthFailed(String::new())).fallback_message()
        );
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback_text() {
        let use_case = AskAiUseCase::new(Arc::new(ScriptedResponder::replying("  ")));
        let output = use_case.execute(AskAiInput::new("q", "")).await.unwrap();
        assert_eq!(output.response_text, EMPTY_REPLY_FALLBACK);
        assert!(!output.logged);
    }

    #[tokio::test]
    async fn test_logs_into_session() {
        let store = Arc::new(MemoryStore::default());
        let responder = Arc::new(ScriptedResponder::replying("Click Export."));
        let dispatcher = Arc::new(ProcessCommandUseCase::new(
            store.clone(),
            store.clone(),
            responder.clone(),
        ));
        let use_case = AskAiUseCase::new(responder).with_command_log(dispatcher);
        let session = Session::start(Utc::now());
        store.insert(&session).await.unwrap();

        let output = use_case
            .execute(AskAiInput::new("How do I export?", "Reports").with_session(session.id()))
            .await
            .unwrap();

        assert!(output.logged);
        let entries = store.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].command_text, "AI Analysis: How do I export?");
        assert_eq!(entries[0].response_text, "Click Export.");
        assert!(entries[0].is_ai_response);
    }

    #[tokio::test]
    async fn test_logging_failure_does_not_fail_ask() {
        let store = Arc::new(MemoryStore::default());
        let responder = Arc::new(ScriptedResponder::replying("Answer"));
        let dispatcher = Arc::new(ProcessCommandUseCase::new(
            store.clone(),
            store.clone(),
            responder.clone(),
        ));
        let use_case = AskAiUseCase::new(responder).with_command_log(dispatcher);

        let output = use_case
            .execute(AskAiInput::new("q", "").with_session(SessionId::generate()))
            .await
            .unwrap();

        assert_eq!(output.response_text, "Answer");
        assert!(!output.logged);
        assert_eq!(store.entry_count(), 0);
    }
}
