//! Application layer for voicelog
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DispatchParams;
pub use ports::ai_responder::{
    AiFailure, AiResponder, CompletionRequest, UnconfiguredResponder, complete_within,
};
pub use use_cases::ask_ai::{AskAiError, AskAiInput, AskAiOutput, AskAiUseCase};
pub use use_cases::get_transcript::{GetTranscriptUseCase, TranscriptError};
pub use use_cases::process_command::{CommandOutcome, ProcessCommandError, ProcessCommandUseCase};
pub use use_cases::session_lifecycle::{
    SessionLifecycleError, SessionLifecycleUseCase, SessionSummary,
};
