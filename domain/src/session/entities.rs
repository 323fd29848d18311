//! Session domain entities

use crate::core::session_id::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bounded interaction window during which commands are logged (Entity)
///
/// `is_active` is derived from `ended_at`, so a session is active exactly
/// while it has no end time. The only transition is active → ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a new active session at `now`.
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::generate(),
            started_at: now,
            ended_at: None,
        }
    }

    /// Rebuild a session from persisted state.
    pub fn restore(
        id: SessionId,
        started_at: DateTime<Utc>,
        ended_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            started_at,
            ended_at,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// End the session at `now`.
    ///
    /// Returns `false` and leaves the session untouched if it already ended.
    pub fn end(&mut self, now: DateTime<Utc>) -> bool {
        if self.ended_at.is_some() {
            return false;
        }
        self.ended_at = Some(now);
        true
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_active() { "Active" } else { "Ended" };
        write!(f, "Session {} ({})", self.id, state)
    }
}
