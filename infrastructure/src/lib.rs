//! Infrastructure layer for voicelog
//!
//! This crate contains adapters that implement the ports defined in the
//! domain and application layers: the SQLite store, the chat-completion
//! provider, and configuration file loading.

pub mod config;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAiConfig, FileConfig, FileDatabaseConfig,
    FileDispatchConfig, FileLoggingConfig, FileServerConfig,
};
pub use persistence::SqliteStore;
pub use providers::{OpenAiResponder, OpenAiSettings};
