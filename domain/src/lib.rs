//! Domain layer for voicelog
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Session**: a bounded interaction window; active until ended, and
//!   ending is a one-way transition.
//! - **Command Log Entry**: an immutable record of one command/response
//!   exchange, appended to its session's log.
//! - **Routing**: `ai:`-prefixed commands go to the AI responder, all
//!   others to the rule-based policy table.
//! - **Transcript**: the ordered history of a session's log.

pub mod command;
pub mod core;
pub mod prompt;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use crate::core::{error::DomainError, session_id::SessionId};
pub use command::{
    routing::{AI_PREFIX, CommandRoute},
    rules::{RuleBasedResponder, RuleReply},
    value_objects::CommandText,
};
pub use prompt::{DEFAULT_CONTEXT_BUDGET_CHARS, NO_SCREEN_CONTENT, PromptTemplate, ScreenContext};
pub use session::{
    command_log::{CommandLogEntry, NewCommandLogEntry},
    entities::Session,
    repository::{CommandLogRepository, SessionRepository, StoreError},
    transcript::{Transcript, TranscriptLine},
};
pub use util::truncate_chars;
