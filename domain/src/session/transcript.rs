//! Transcript: the ordered read view over a session's command log

use super::command_log::CommandLogEntry;
use super::entities::Session;
use crate::core::session_id::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of a transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub response: String,
    pub is_ai_response: bool,
    pub processing_time_ms: Option<u64>,
}

impl From<CommandLogEntry> for TranscriptLine {
    fn from(entry: CommandLogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            command: entry.command_text,
            response: entry.response_text,
            is_ai_response: entry.is_ai_response,
            processing_time_ms: entry.processing_time_ms,
        }
    }
}

/// Full ordered history of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub total_commands: usize,
    pub commands: Vec<TranscriptLine>,
}

impl Transcript {
    /// Assemble a transcript from a session and its log entries.
    ///
    /// Entries are ordered ascending by timestamp; ties keep insertion order
    /// via the store-assigned id. Entries belonging to other sessions are
    /// ignored.
    pub fn assemble(session: &Session, mut entries: Vec<CommandLogEntry>) -> Self {
        let session_id = session.id();
        entries.retain(|e| e.session_id == session_id);
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

        let commands: Vec<TranscriptLine> = entries.into_iter().map(Into::into).collect();

        Self {
            session_id,
            started_at: session.started_at(),
            ended_at: session.ended_at(),
            is_active: session.is_active(),
            total_commands: commands.len(),
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::command_log::NewCommandLogEntry;
    use chrono::Duration;

    fn entry(session: &Session, id: i64, offset_ms: i64, text: &str) -> CommandLogEntry {
        NewCommandLogEntry::new(session.id(), text, format!("re: {}", text))
            .with_timestamp(session.started_at() + Duration::milliseconds(offset_ms))
            .into_entry(id)
    }

    #[test]
    fn test_assemble_orders_ascending() {
        let session = Session::start(Utc::now());
        let entries = vec![
            entry(&session, 3, 300, "third"),
            entry(&session, 1, 100, "first"),
            entry(&session, 2, 200, "second"),
        ];

        let transcript = Transcript::assemble(&session, entries);

        let commands: Vec<&str> = transcript
            .commands
            .iter()
            .map(|c| c.command.as_str())
            .collect();
        assert_eq!(commands, vec!["first", "second", "third"]);
        assert_eq!(transcript.total_commands, 3);
        assert!(transcript.is_active);
        assert!(transcript.ended_at.is_none());
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let session = Session::start(Utc::now());
        let entries = vec![
            entry(&session, 11, 0, "b"),
            entry(&session, 10, 0, "a"),
        ];

        let transcript = Transcript::assemble(&session, entries);
        assert_eq!(transcript.commands[0].command, "a");
        assert_eq!(transcript.commands[1].command, "b");
    }

    #[test]
    fn test_foreign_entries_are_dropped() {
        let session = Session::start(Utc::now());
        let other = Session::start(Utc::now());
        let entries = vec![entry(&session, 1, 0, "mine"), entry(&other, 2, 0, "theirs")];

        let transcript = Transcript::assemble(&session, entries);
        assert_eq!(transcript.total_commands, 1);
        assert_eq!(transcript.commands[0].command, "mine");
    }

    #[test]
    fn test_ended_session_fields() {
        let now = Utc::now();
        let mut session = Session::start(now);
        session.end(now + Duration::seconds(1));

        let transcript = Transcript::assemble(&session, Vec::new());
        assert!(!transcript.is_active);
        assert_eq!(transcript.ended_at, session.ended_at());
        assert_eq!(transcript.total_commands, 0);
        assert!(transcript.commands.is_empty());
    }
}
