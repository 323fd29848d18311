//! Demo session domain.
//!
//! - [`entities::Session`]: a demo session and its lifecycle
//! - [`command_log::CommandLogEntry`]: one logged command/response exchange
//! - [`transcript::Transcript`]: ordered read view of a session's log
//! - [`repository`]: traits for session and command log persistence

pub mod command_log;
pub mod entities;
pub mod repository;
pub mod transcript;
