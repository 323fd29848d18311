//! Get Transcript use case: read-only assembly of a session's history.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use voicelog_domain::{CommandLogRepository, SessionId, SessionRepository, StoreError, Transcript};

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Session not found")]
    NotFound(SessionId),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct GetTranscriptUseCase {
    sessions: Arc<dyn SessionRepository>,
    logs: Arc<dyn CommandLogRepository>,
}

impl GetTranscriptUseCase {
    pub fn new(sessions: Arc<dyn SessionRepository>, logs: Arc<dyn CommandLogRepository>) -> Self {
        Self { sessions, logs }
    }

    pub async fn execute(&self, session_id: SessionId) -> Result<Transcript, TranscriptError> {
        let session = self
            .sessions
            .find(session_id)
            .await?
            .ok_or(TranscriptError::NotFound(session_id))?;

        let entries = self.logs.list_for_session(session_id).await?;
        let transcript = Transcript::assemble(&session, entries);

        debug!(
            session_id = %session_id,
            total = transcript.total_commands,
            "Assembled transcript"
        );
        Ok(transcript)
    }
}
