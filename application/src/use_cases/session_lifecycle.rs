//! Session lifecycle use case.
//!
//! Creates, looks up, ends and deletes demo sessions. Ending is idempotent:
//! only an existing active session transitions, every other call is a
//! no-op reported as `false`.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use voicelog_domain::{CommandLogRepository, Session, SessionId, SessionRepository, StoreError};

/// Errors that can occur while managing sessions.
#[derive(Error, Debug)]
pub enum SessionLifecycleError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// A session together with the size of its command log.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session: Session,
    pub total_commands: usize,
}

/// Use case for the session lifecycle.
#[derive(Clone)]
pub struct SessionLifecycleUseCase {
    sessions: Arc<dyn SessionRepository>,
    logs: Arc<dyn CommandLogRepository>,
}

impl SessionLifecycleUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>, logs: Arc<dyn CommandLogRepository>) -> Self {
        Self { sessions, logs }
    }

    /// Start a new active session.
    pub async fn create_session(&self) -> Result<Session, StoreError> {
        let session = Session::start(Utc::now());
        self.sessions.insert(&session).await?;
        info!(session_id = %session.id(), "Created new session");
        Ok(session)
    }

    pub async fn get_session(&self, id: SessionId) -> Result<Session, SessionLifecycleError> {
        self.sessions.find(id).await?.ok_or_else(|| {
            warn!(session_id = %id, "Session not found");
            SessionLifecycleError::NotFound(id)
        })
    }

    /// End a session.
    ///
    /// Returns `true` only when an active session was transitioned.
    pub async fn end_session(&self, id: SessionId) -> Result<bool, StoreError> {
        match self.sessions.end(id, Utc::now()).await? {
            Some(_) => {
                info!(session_id = %id, "Ended session");
                Ok(true)
            }
            None => {
                warn!(session_id = %id, "End requested for missing or ended session");
                Ok(false)
            }
        }
    }

    /// Read-only listing, newest first, with per-session command counts.
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>, StoreError> {
        let sessions = self.sessions.list().await?;
        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            let total_commands = self.logs.count_for_session(session.id()).await?;
            summaries.push(SessionSummary {
                session,
                total_commands,
            });
        }
        Ok(summaries)
    }

    /// Delete a session and its command log.
    pub async fn delete_session(&self, id: SessionId) -> Result<bool, StoreError> {
        let deleted = self.sessions.delete(id).await?;
        if deleted {
            info!(session_id = %id, "Deleted session");
        }
        Ok(deleted)
    }
}
