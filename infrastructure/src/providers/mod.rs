//! Chat-completion provider adapters implementing [`AiResponder`].
//!
//! [`AiResponder`]: voicelog_application::AiResponder

pub mod openai;

pub use openai::{OpenAiResponder, OpenAiSettings};
