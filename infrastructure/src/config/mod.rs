//! Configuration file loading for voicelog
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VOICELOG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./voicelog.toml` or `./.voicelog.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/voicelog/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAiConfig, FileConfig, FileDatabaseConfig, FileDispatchConfig,
    FileLoggingConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
