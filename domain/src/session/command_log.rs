//! Command log entries: the append-only record of a session's exchanges

use crate::core::session_id::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted command/response exchange (Entity)
///
/// Entries are immutable once written; `id` is assigned by the store and
/// increases monotonically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLogEntry {
    pub id: i64,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub command_text: String,
    pub response_text: String,
    pub is_ai_response: bool,
    pub processing_time_ms: Option<u64>,
}

/// An entry that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommandLogEntry {
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub command_text: String,
    pub response_text: String,
    pub is_ai_response: bool,
    pub processing_time_ms: Option<u64>,
}

impl NewCommandLogEntry {
    pub fn new(
        session_id: SessionId,
        command_text: impl Into<String>,
        response_text: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            timestamp: Utc::now(),
            command_text: command_text.into(),
            response_text: response_text.into(),
            is_ai_response: false,
            processing_time_ms: None,
        }
    }

    pub fn with_ai_response(mut self, is_ai_response: bool) -> Self {
        self.is_ai_response = is_ai_response;
        self
    }

    pub fn with_processing_time_ms(mut self, ms: u64) -> Self {
        self.processing_time_ms = Some(ms);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach the store-assigned id.
    pub fn into_entry(self, id: i64) -> CommandLogEntry {
        CommandLogEntry {
            id,
            session_id: self.session_id,
            timestamp: self.timestamp,
            command_text: self.command_text,
            response_text: self.response_text,
            is_ai_response: self.is_ai_response,
            processing_time_ms: self.processing_time_ms,
        }
    }
}
