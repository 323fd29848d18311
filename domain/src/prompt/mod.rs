//! Prompt domain
//!
//! Screen context budgeting and templates for the context-aware assistant.

pub mod context;
mod template;

pub use context::{DEFAULT_CONTEXT_BUDGET_CHARS, ScreenContext};
pub use template::{NO_SCREEN_CONTENT, PromptTemplate};
