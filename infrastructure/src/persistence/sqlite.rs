//! SQLite-backed session and command log store.
//!
//! A single connection guarded by a mutex. Every statement runs on the
//! blocking pool through `run_blocking`, so a slow disk or a locked database
//! never stalls the async workers. Timestamps are stored as RFC 3339 UTC
//! strings with fixed nanosecond precision, so ordering by the text column is
//! chronological.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};
use voicelog_domain::{
    CommandLogEntry, CommandLogRepository, NewCommandLogEntry, Session, SessionId,
    SessionRepository, StoreError,
};

const CURRENT_VERSION: i32 = 1;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SESSION_COLUMNS: &str = "session_id, started_at, ended_at";
const ENTRY_COLUMNS: &str =
    "id, session_id, timestamp, command_text, response, is_ai_response, processing_time_ms";

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(unavailable)?;
        info!(path = %path.display(), "Opened SQLite store");
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(unavailable)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(unavailable)?;

        let version: i32 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .map_err(query)?;
        if version < CURRENT_VERSION {
            Self::create_schema(&conn)?;
            debug!(from = version, to = CURRENT_VERSION, "Migrated schema");
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn create_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                session_id TEXT PRIMARY KEY,
                started_at TEXT NOT NULL,
                ended_at TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                CHECK ((is_active = 1) = (ended_at IS NULL))
            );

            CREATE TABLE IF NOT EXISTS command_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL
                    REFERENCES sessions(session_id) ON DELETE CASCADE,
                timestamp TEXT NOT NULL,
                command_text TEXT NOT NULL CHECK (length(command_text) > 0),
                response TEXT NOT NULL,
                is_ai_response INTEGER NOT NULL DEFAULT 0,
                processing_time_ms INTEGER
                    CHECK (processing_time_ms IS NULL OR processing_time_ms >= 0)
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_started ON sessions(started_at);
            CREATE INDEX IF NOT EXISTS idx_command_logs_session_time
                ON command_logs(session_id, timestamp);

            PRAGMA user_version = 1;",
        )
        .map_err(query)
    }

    /// Run `f` against the connection on tokio's blocking pool.
    async fn run_blocking<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("blocking task failed: {}", e)))?
    }
}

fn find_session(conn: &Connection, id: &str) -> Result<Option<Session>, StoreError> {
    conn.query_row(
        &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE session_id = ?1"),
        params![id],
        session_from_row,
    )
    .optional()
    .map_err(query)
}

#[async_trait]
impl SessionRepository for SqliteStore {
    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        let id = session.id().to_string();
        let started_at = format_time(session.started_at());
        let ended_at = session.ended_at().map(format_time);
        let is_active = session.is_active();

        self.run_blocking(move |conn| {
            conn.execute(
                "INSERT INTO sessions (session_id, started_at, ended_at, is_active)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, started_at, ended_at, is_active],
            )
            .map_err(query)?;
            Ok(())
        })
        .await
    }

    async fn find(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        let id = id.to_string();
        self.run_blocking(move |conn| find_session(conn, &id)).await
    }

    async fn end(
        &self,
        id: SessionId,
        ended_at: DateTime<Utc>,
    ) -> Result<Option<Session>, StoreError> {
        let id = id.to_string();
        let ended_at = format_time(ended_at);

        self.run_blocking(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE sessions SET ended_at = ?1, is_active = 0
                     WHERE session_id = ?2 AND is_active = 1",
                    params![ended_at, id],
                )
                .map_err(query)?;
            if changed == 0 {
                return Ok(None);
            }
            find_session(conn, &id)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        self.run_blocking(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY started_at DESC"
                ))
                .map_err(query)?;
            let sessions = stmt
                .query_map([], session_from_row)
                .map_err(query)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(query)?;
            Ok(sessions)
        })
        .await
    }

    async fn delete(&self, id: SessionId) -> Result<bool, StoreError> {
        let id = id.to_string();
        self.run_blocking(move |conn| {
            let removed = conn
                .execute("DELETE FROM sessions WHERE session_id = ?1", params![id])
                .map_err(query)?;
            Ok(removed > 0)
        })
        .await
    }
}

#[async_trait]
impl CommandLogRepository for SqliteStore {
    async fn append(&self, entry: NewCommandLogEntry) -> Result<CommandLogEntry, StoreError> {
        let processing_time_ms = entry
            .processing_time_ms
            .map(i64::try_from)
            .transpose()
            .map_err(|e| StoreError::Query(format!("processing time out of range: {}", e)))?;

        self.run_blocking(move |conn| {
            conn.execute(
                "INSERT INTO command_logs
                    (session_id, timestamp, command_text, response,
                     is_ai_response, processing_time_ms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entry.session_id.to_string(),
                    format_time(entry.timestamp),
                    entry.command_text,
                    entry.response_text,
                    entry.is_ai_response,
                    processing_time_ms,
                ],
            )
            .map_err(query)?;

            Ok(entry.into_entry(conn.last_insert_rowid()))
        })
        .await
    }

    async fn list_for_session(&self, id: SessionId) -> Result<Vec<CommandLogEntry>, StoreError> {
        let id = id.to_string();
        self.run_blocking(move |conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM command_logs
                     WHERE session_id = ?1
                     ORDER BY timestamp ASC, id ASC"
                ))
                .map_err(query)?;
            let entries = stmt
                .query_map(params![id], entry_from_row)
                .map_err(query)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(query)?;
            Ok(entries)
        })
        .await
    }

    async fn count_for_session(&self, id: SessionId) -> Result<usize, StoreError> {
        let id = id.to_string();
        let count: i64 = self
            .run_blocking(move |conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM command_logs WHERE session_id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .map_err(query)
            })
            .await?;
        usize::try_from(count).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

fn unavailable(e: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn query(e: rusqlite::Error) -> StoreError {
    match e {
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            StoreError::Corrupt(e.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_session_id(idx: usize, raw: &str) -> rusqlite::Result<SessionId> {
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    let id: String = row.get(0)?;
    let started_at: String = row.get(1)?;
    let ended_at: Option<String> = row.get(2)?;

    Ok(Session::restore(
        parse_session_id(0, &id)?,
        parse_time(1, &started_at)?,
        ended_at.as_deref().map(|t| parse_time(2, t)).transpose()?,
    ))
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<CommandLogEntry> {
    let session_id: String = row.get(1)?;
    let timestamp: String = row.get(2)?;
    let processing_time_ms: Option<i64> = row.get(6)?;

    Ok(CommandLogEntry {
        id: row.get(0)?,
        session_id: parse_session_id(1, &session_id)?,
        timestamp: parse_time(2, &timestamp)?,
        command_text: row.get(3)?,
        response_text: row.get(4)?,
        is_ai_response: row.get(5)?,
        processing_time_ms: processing_time_ms.map(|ms| ms.max(0) as u64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn store_with_session() -> (SqliteStore, Session) {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = Session::start(Utc::now());
        store.insert(&session).await.unwrap();
        (store, session)
    }

    #[tokio::test]
    async fn test_insert_and_find_roundtrip() {
        let (store, session) = store_with_session().await;

        let found = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(found, session);
        assert!(found.is_active());
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.find(SessionId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_end_only_once() {
        let (store, session) = store_with_session().await;
        let first = session.started_at() + Duration::seconds(1);

        let ended = store.end(session.id(), first).await.unwrap().unwrap();
        assert!(!ended.is_active());
        assert_eq!(ended.ended_at(), Some(first));

        let second = first + Duration::seconds(1);
        assert!(store.end(session.id(), second).await.unwrap().is_none());
        let reloaded = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(reloaded.ended_at(), Some(first));
    }

    #[tokio::test]
    async fn test_end_missing_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(
            store
                .end(SessionId::generate(), Utc::now())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_append_assigns_increasing_ids() {
        let (store, session) = store_with_session().await;

        let first = store
            .append(NewCommandLogEntry::new(session.id(), "hello", "hi"))
            .await
            .unwrap();
        let second = store
            .append(
                NewCommandLogEntry::new(session.id(), "ai: x", "y")
                    .with_ai_response(true)
                    .with_processing_time_ms(17),
            )
            .await
            .unwrap();

        assert!(second.id > first.id);
        let entries = store.list_for_session(session.id()).await.unwrap();
        assert_eq!(entries, vec![first, second]);
        assert_eq!(entries[1].processing_time_ms, Some(17));
        assert!(entries[1].is_ai_response);
    }

    #[tokio::test]
    async fn test_list_for_session_orders_by_timestamp() {
        let (store, session) = store_with_session().await;
        let base = session.started_at();
        for (offset, text) in [(300, "c"), (100, "a"), (200, "b")] {
            store
                .append(
                    NewCommandLogEntry::new(session.id(), text, "ok")
                        .with_timestamp(base + Duration::milliseconds(offset)),
                )
                .await
                .unwrap();
        }

        let texts: Vec<String> = store
            .list_for_session(session.id())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.command_text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_entries_are_scoped_to_session() {
        let (store, session) = store_with_session().await;
        let other = Session::start(Utc::now());
        store.insert(&other).await.unwrap();
        store
            .append(NewCommandLogEntry::new(other.id(), "hello", "hi"))
            .await
            .unwrap();

        assert!(store.list_for_session(session.id()).await.unwrap().is_empty());
        assert_eq!(store.count_for_session(other.id()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_to_missing_session_fails() {
        let store = SqliteStore::open_in_memory().unwrap();
        let result = store
            .append(NewCommandLogEntry::new(SessionId::generate(), "hello", "hi"))
            .await;
        assert!(matches!(result, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn test_empty_command_rejected_by_schema() {
        let (store, session) = store_with_session().await;
        let result = store
            .append(NewCommandLogEntry::new(session.id(), "", "hi"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_command_log() {
        let (store, session) = store_with_session().await;
        store
            .append(NewCommandLogEntry::new(session.id(), "hello", "hi"))
            .await
            .unwrap();

        assert!(store.delete(session.id()).await.unwrap());
        assert!(store.find(session.id()).await.unwrap().is_none());
        assert_eq!(store.count_for_session(session.id()).await.unwrap(), 0);
        assert!(!store.delete(session.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        let now = Utc::now();
        let older = Session::start(now - Duration::minutes(5));
        let newer = Session::start(now);
        store.insert(&older).await.unwrap();
        store.insert(&newer).await.unwrap();

        let ids: Vec<SessionId> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(Session::id)
            .collect();
        assert_eq!(ids, vec![newer.id(), older.id()]);
    }

    #[tokio::test]
    async fn test_locked_database_does_not_stall_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voicelog.db");
        let store = Arc::new(SqliteStore::open(&path).unwrap());

        let blocker = Connection::open(&path).unwrap();
        blocker.execute_batch("BEGIN EXCLUSIVE").unwrap();

        let session = Session::start(Utc::now());
        let pending = {
            let store = Arc::clone(&store);
            let session = session.clone();
            tokio::spawn(async move { store.insert(&session).await })
        };

        // The insert now waits on the lock; a blocked worker would hold this
        // sleep until the busy timeout expired and the insert failed.
        let started = std::time::Instant::now();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(started.elapsed() < BUSY_TIMEOUT);
        assert!(!pending.is_finished());

        blocker.execute_batch("COMMIT").unwrap();
        pending.await.unwrap().unwrap();
        assert_eq!(store.find(session.id()).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("voicelog.db");

        let session = Session::start(Utc::now());
        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(&session).await.unwrap();
            store
                .append(NewCommandLogEntry::new(session.id(), "time", "12:00"))
                .await
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.find(session.id()).await.unwrap(), Some(session.clone()));
        assert_eq!(store.count_for_session(session.id()).await.unwrap(), 1);
    }
}
