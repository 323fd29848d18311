//! Presentation layer for voicelog
//!
//! This crate contains the HTTP API (axum router, request validation,
//! error rendering) and the CLI definition.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, AppState, build_router};
