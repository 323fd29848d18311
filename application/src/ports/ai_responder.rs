//! AI Responder port
//!
//! Defines the contract for the external chat-completion service. Failures
//! come back as a tagged [`AiFailure`] instead of provider-specific errors,
//! so callers can switch on them exhaustively.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Typed failures of the AI boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiFailure {
    #[error("AI service not configured")]
    NotConfigured,

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

/// A single completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub system_context: Option<String>,
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            system_context: None,
            max_output_tokens,
        }
    }

    pub fn with_system_context(mut self, context: impl Into<String>) -> Self {
        self.system_context = Some(context.into());
        self
    }
}

/// Gateway to a chat-completion provider
///
/// Implementations (adapters) live in the infrastructure layer and receive
/// their credentials at construction time.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Send the prompt and return the reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiFailure>;
}

/// Responder used when no provider is configured.
pub struct UnconfiguredResponder;

#[async_trait]
impl AiResponder for UnconfiguredResponder {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, AiFailure> {
        Err(AiFailure::NotConfigured)
    }
}

/// Call the responder, giving up after `timeout`.
///
/// An elapsed timeout is reported as [`AiFailure::ServiceError`].
pub async fn complete_within(
    responder: &dyn AiResponder,
    request: &CompletionRequest,
    timeout: Option<Duration>,
) -> Result<String, AiFailure> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, responder.complete(request))
            .await
            .unwrap_or_else(|_| {
                Err(AiFailure::ServiceError(format!(
                    "request timed out after {}ms",
                    limit.as_millis()
                )))
            }),
        None => responder.complete(request).await,
    }
}
