//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! where the rest of the service needs them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use voicelog_application::DispatchParams;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("ai.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("ai.model cannot be empty")]
    EmptyModelName,

    #[error("dispatch.{0} must be greater than 0")]
    ZeroLimit(&'static str),
}

/// Raw HTTP server configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl FileServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Raw database configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatabaseConfig {
    /// SQLite file path, or `:memory:`. Defaults to the platform data dir.
    pub path: Option<String>,
}

impl FileDatabaseConfig {
    pub const IN_MEMORY: &'static str = ":memory:";

    /// Resolve the database location.
    ///
    /// Returns `None` for an in-memory database.
    pub fn resolve_path(&self) -> Option<PathBuf> {
        match self.path.as_deref() {
            Some(Self::IN_MEMORY) => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(Self::default_path()),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("voicelog")
            .join("voicelog.db")
    }
}

/// Chat-completion provider configuration (`[ai]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for FileAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            timeout_seconds: 30,
        }
    }
}

impl FileAiConfig {
    /// Resolve the API key: the direct key wins, then the named env var.
    ///
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Input limits and token budgets (`[dispatch]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    pub max_command_chars: usize,
    pub context_budget_chars: usize,
    pub command_max_tokens: u32,
    pub ask_max_tokens: u32,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        let params = DispatchParams::default();
        Self {
            max_command_chars: params.max_command_chars,
            context_budget_chars: params.context_budget_chars,
            command_max_tokens: params.command_max_tokens,
            ask_max_tokens: params.ask_max_tokens,
        }
    }
}

/// Log file output (`[logging]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling log files. Console only when unset.
    pub dir: Option<String>,
    pub file_prefix: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_prefix: "voicelog.log".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub database: FileDatabaseConfig,
    pub ai: FileAiConfig,
    pub dispatch: FileDispatchConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.ai.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.ai.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        let limits = [
            ("max_command_chars", self.dispatch.max_command_chars),
            ("context_budget_chars", self.dispatch.context_budget_chars),
            ("command_max_tokens", self.dispatch.command_max_tokens as usize),
            ("ask_max_tokens", self.dispatch.ask_max_tokens as usize),
        ];
        if let Some(&(name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigValidationError::ZeroLimit(name));
        }

        Ok(())
    }

    /// Build the application's dispatch parameters.
    pub fn dispatch_params(&self) -> DispatchParams {
        DispatchParams::default()
            .with_max_command_chars(self.dispatch.max_command_chars)
            .with_context_budget_chars(self.dispatch.context_budget_chars)
            .with_command_max_tokens(self.dispatch.command_max_tokens)
            .with_ask_max_tokens(self.dispatch.ask_max_tokens)
            .with_ai_timeout(Some(self.ai.timeout()))
    }
}
