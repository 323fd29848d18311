//! Session and command log repository traits

use super::command_log::{CommandLogEntry, NewCommandLogEntry};
use super::entities::Session;
use crate::core::session_id::SessionId;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a persistence backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Repository trait for demo sessions
///
/// This is a domain-level abstraction that defines how sessions
/// are persisted. Implementations live in the infrastructure layer.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a newly started session
    async fn insert(&self, session: &Session) -> Result<(), StoreError>;

    /// Look up a session by id
    async fn find(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    /// Atomically mark an active session as ended.
    ///
    /// Returns the ended session, or `None` when the session does not exist
    /// or had already ended (in which case nothing is written).
    async fn end(
        &self,
        id: SessionId,
        ended_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<Session>, StoreError>;

    /// All sessions, newest first
    async fn list(&self) -> Result<Vec<Session>, StoreError>;

    /// Delete a session together with its command log.
    ///
    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: SessionId) -> Result<bool, StoreError>;
}

/// Append-only repository for command log entries
#[async_trait]
pub trait CommandLogRepository: Send + Sync {
    /// Append an entry and return it with its assigned id
    async fn append(&self, entry: NewCommandLogEntry) -> Result<CommandLogEntry, StoreError>;

    /// Entries of one session, ascending by timestamp
    async fn list_for_session(&self, id: SessionId) -> Result<Vec<CommandLogEntry>, StoreError>;

    /// Number of entries logged for one session
    async fn count_for_session(&self, id: SessionId) -> Result<usize, StoreError>;
}
