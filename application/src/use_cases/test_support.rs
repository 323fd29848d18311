//! In-memory ports shared by the use case tests.

use crate::ports::ai_responder::{AiFailure, AiResponder, CompletionRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use voicelog_domain::{
    CommandLogEntry, CommandLogRepository, NewCommandLogEntry, Session, SessionId,
    SessionRepository, StoreError,
};

#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
    entries: Mutex<Vec<CommandLogEntry>>,
}

impl MemoryStore {
    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn entries(&self) -> Vec<CommandLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.lock().unwrap().get(&id).cloned())
    }

    async fn end(
        &self,
        id: SessionId,
        ended_at: DateTime<Utc>,
    ) -> Result<Option<Session>, StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get_mut(&id) {
            Some(session) => Ok(session.end(ended_at).then(|| session.clone())),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        let mut sessions: Vec<Session> = self.sessions.lock().unwrap().values().cloned().collect();
        sessions.sort_by_key(|s| std::cmp::Reverse(s.started_at()));
        Ok(sessions)
    }

    async fn delete(&self, id: SessionId) -> Result<bool, StoreError> {
        let removed = self.sessions.lock().unwrap().remove(&id).is_some();
        if removed {
            self.entries.lock().unwrap().retain(|e| e.session_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl CommandLogRepository for MemoryStore {
    async fn append(&self, entry: NewCommandLogEntry) -> Result<CommandLogEntry, StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entry.into_entry(entries.len() as i64 + 1);
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_for_session(&self, id: SessionId) -> Result<Vec<CommandLogEntry>, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.session_id == id)
            .cloned()
            .collect())
    }

    async fn count_for_session(&self, id: SessionId) -> Result<usize, StoreError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.session_id == id)
            .count())
    }
}

/// Store whose every call fails
pub struct BrokenStore;

fn broken<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("disk on fire".to_string()))
}

#[async_trait]
impl SessionRepository for BrokenStore {
    async fn insert(&self, _session: &Session) -> Result<(), StoreError> {
        broken()
    }

    async fn find(&self, _id: SessionId) -> Result<Option<Session>, StoreError> {
        broken()
    }

    async fn end(
        &self,
        _id: SessionId,
        _ended_at: DateTime<Utc>,
    ) -> Result<Option<Session>, StoreError> {
        broken()
    }

    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        broken()
    }

    async fn delete(&self, _id: SessionId) -> Result<bool, StoreError> {
        broken()
    }
}

#[async_trait]
impl CommandLogRepository for BrokenStore {
    async fn append(&self, _entry: NewCommandLogEntry) -> Result<CommandLogEntry, StoreError> {
        broken()
    }

    async fn list_for_session(&self, _id: SessionId) -> Result<Vec<CommandLogEntry>, StoreError> {
        broken()
    }

    async fn count_for_session(&self, _id: SessionId) -> Result<usize, StoreError> {
        broken()
    }
}

/// Responder that replays scripted results and records what it was asked
pub struct ScriptedResponder {
    replies: Mutex<VecDeque<Result<String, AiFailure>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedResponder {
    pub fn new(replies: Vec<Result<String, AiFailure>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(failure: AiFailure) -> Self {
        Self::new(vec![Err(failure)])
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiResponder for ScriptedResponder {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiFailure> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiFailure::ServiceError("No more replies".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_end_transitions_once() {
        let store = MemoryStore::default();
        let session = Session::start(Utc::now());
        store.insert(&session).await.unwrap();

        let ended_at = Utc::now();
        let ended = store.end(session.id(), ended_at).await.unwrap().unwrap();
        assert!(!ended.is_active());
        assert_eq!(ended.ended_at(), Some(ended_at));

        assert!(store.end(session.id(), Utc::now()).await.unwrap().is_none());
        let stored = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.ended_at(), Some(ended_at));
        assert!(
            store
                .end(SessionId::generate(), Utc::now())
                .await
                .unwrap()
                .is_none()
        );
    }
}
