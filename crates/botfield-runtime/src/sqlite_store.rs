//! SQLite-backed implementation of the Store trait.
//!
//! Three tables: `agents`, `posts` and `events`, with foreign keys from
//! posts and events back to agents. Timestamps are RFC 3339 UTC text and
//! event metadata is serialized JSON.

use botfield_core::error::{BotfieldError, Result};
use botfield_core::store::Store;
use botfield_core::types::*;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Default database file name.
pub const DEFAULT_DB_PATH: &str = "botfield.db";

fn store_err(e: rusqlite::Error) -> BotfieldError {
    match e {
        rusqlite::Error::SqliteFailure(code, msg)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            BotfieldError::store(format!(
                "foreign key violation: {}",
                msg.unwrap_or_else(|| "row references an unknown agent".to_string())
            ))
        }
        other => BotfieldError::store(other.to_string()),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| BotfieldError::corrupt(format!("bad timestamp '{raw}': {e}")))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Raw post row before decoding.
struct PostRow {
    id: i64,
    author_id: i64,
    content: String,
    created_at: String,
}

impl PostRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            author_id: row.get(1)?,
            content: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn decode(self) -> Result<Post> {
        Ok(Post {
            id: PostId(self.id),
            author_id: AgentId(self.author_id),
            content: self.content,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// SQLite store.
///
/// Supports both in-memory and file-backed databases.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Create a new in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::init_with_connection(conn, None)
    }

    /// Create or open a file-backed store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(store_err)?;
        Self::init_with_connection(conn, Some(path))
    }

    /// Open a file-backed store that must already exist.
    ///
    /// Unlike [`open`](Self::open), a missing file is an error and nothing
    /// is created on disk.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&path, flags).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(code, _) if code.code == rusqlite::ErrorCode::CannotOpen => {
                BotfieldError::store(format!("no database at {}", path.display()))
            }
            other => store_err(other),
        })?;
        Self::init_with_connection(conn, Some(path))
    }

    fn init_with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
            .map_err(store_err)?;
        let store = Self { conn, path };
        store.create_tables()?;
        Ok(store)
    }

    fn create_tables(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS agents (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS posts (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    author_id INTEGER NOT NULL,
                    content TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    FOREIGN KEY (author_id) REFERENCES agents(id)
                );

                CREATE TABLE IF NOT EXISTS events (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    tick INTEGER NOT NULL,
                    agent_id INTEGER NOT NULL,
                    action_type TEXT NOT NULL,
                    metadata TEXT,
                    created_at TEXT NOT NULL,
                    FOREIGN KEY (agent_id) REFERENCES agents(id)
                );

                CREATE INDEX IF NOT EXISTS idx_events_tick ON events(tick);
                CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author_id);
                "#,
            )
            .map_err(store_err)
    }

    /// Database file, if file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Row counts for (agents, posts, events).
    pub fn counts(&self) -> Result<(usize, usize, usize)> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
                .map_err(store_err)?;
            Ok(n as usize)
        };
        Ok((count("agents")?, count("posts")?, count("events")?))
    }

    fn query_posts(&self, sql: &str, limit: Option<usize>) -> Result<Vec<Post>> {
        let mut stmt = self.conn.prepare(sql).map_err(store_err)?;
        let rows = match limit {
            Some(limit) => stmt.query_map(params![limit as i64], PostRow::from_row),
            None => stmt.query_map([], PostRow::from_row),
        }
        .map_err(store_err)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row.map_err(store_err)?.decode()?);
        }
        Ok(posts)
    }
}

impl Store for SqliteStore {
    fn insert_agent(&mut self, name: &str) -> Result<AgentId> {
        self.conn
            .execute(
                "INSERT INTO agents (name, created_at) VALUES (?1, ?2)",
                params![name, timestamp()],
            )
            .map_err(store_err)?;
        Ok(AgentId(self.conn.last_insert_rowid()))
    }

    fn insert_post(&mut self, author_id: AgentId, content: &str) -> Result<PostId> {
        self.conn
            .execute(
                "INSERT INTO posts (author_id, content, created_at) VALUES (?1, ?2, ?3)",
                params![author_id.0, content, timestamp()],
            )
            .map_err(store_err)?;
        Ok(PostId(self.conn.last_insert_rowid()))
    }

    fn insert_event(
        &mut self,
        tick: Tick,
        agent_id: AgentId,
        action_type: ActionType,
        metadata: &Metadata,
    ) -> Result<()> {
        let metadata = serde_json::to_string(metadata)?;
        self.conn
            .execute(
                r#"
                INSERT INTO events (tick, agent_id, action_type, metadata, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![tick as i64, agent_id.0, action_type.as_str(), metadata, timestamp()],
            )
            .map_err(store_err)?;
        Ok(())
    }

    fn recent_posts(&self, limit: usize) -> Result<Vec<Post>> {
        self.query_posts(
            "SELECT id, author_id, content, created_at FROM posts ORDER BY id DESC LIMIT ?1",
            Some(limit),
        )
    }

    fn agents(&self) -> Result<Vec<AgentRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM agents ORDER BY id")
            .map_err(store_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(store_err)?;

        let mut agents = Vec::new();
        for row in rows {
            let (id, name, created_at) = row.map_err(store_err)?;
            agents.push(AgentRecord {
                id: AgentId(id),
                name,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(agents)
    }

    fn posts(&self) -> Result<Vec<Post>> {
        self.query_posts(
            "SELECT id, author_id, content, created_at FROM posts ORDER BY id",
            None,
        )
    }

    fn events(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, tick, agent_id, action_type, metadata, created_at FROM events ORDER BY id",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })
            .map_err(store_err)?;

        let mut events = Vec::new();
        for row in rows {
            let (id, tick, agent_id, action_type, metadata, created_at) = row.map_err(store_err)?;
            let action_type = action_type
                .parse::<ActionType>()
                .map_err(BotfieldError::corrupt)?;
            let metadata = match metadata {
                Some(raw) => serde_json::from_str::<Metadata>(&raw)?,
                None => Metadata::new(),
            };
            events.push(Event {
                id: EventId(id),
                tick: tick as Tick,
                agent_id: AgentId(agent_id),
                action_type,
                metadata,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(events)
    }

    fn reset(&mut self) -> Result<()> {
        self.conn
            .execute_batch(
                "DROP TABLE IF EXISTS events; DROP TABLE IF EXISTS posts; DROP TABLE IF EXISTS agents;",
            )
            .map_err(store_err)?;
        self.create_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_read_back() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_agent("BalancedAgent").unwrap();
        assert_eq!(id, AgentId(1));

        let post_id = store.insert_post(id, "Steady progress at tick 1.").unwrap();
        store
            .record(
                1,
                id,
                &EventPayload::PostCreated {
                    post_id,
                    content_length: 27,
                    degraded: None,
                },
            )
            .unwrap();

        let events = store.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action_type, ActionType::PostCreated);
        assert_eq!(events[0].metadata_i64("post_id"), Some(post_id.0));
        assert_eq!(events[0].metadata_i64("content_length"), Some(27));
        assert_eq!(store.counts().unwrap(), (1, 1, 1));
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let err = store.insert_post(AgentId(99), "orphan").unwrap_err();
        assert!(err.is_store());
    }

    #[test]
    fn test_recent_posts_newest_first() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_agent("NoisyAgent").unwrap();
        for i in 1..=8 {
            store.insert_post(id, &format!("post {i}")).unwrap();
        }

        let recent = store.recent_posts(5).unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].content, "post 8");
        assert_eq!(recent[4].content, "post 4");
        assert!(store.recent_posts(0).unwrap().is_empty());
    }

    #[test]
    fn test_open_existing_never_creates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let err = SqliteStore::open_existing(&path).err().unwrap();
        assert!(err.is_store());
        assert!(err.to_string().contains("no database at"));
        assert!(!path.exists());

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.insert_agent("NoisyAgent").unwrap();
        }
        let reopened = SqliteStore::open_existing(&path).unwrap();
        assert_eq!(reopened.counts().unwrap(), (1, 0, 0));
        assert_eq!(reopened.path(), Some(path.as_path()));
    }

    #[test]
    fn test_reset_restarts_ids() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let id = store.insert_agent("PassiveAgent").unwrap();
        store.insert_post(id, "hello").unwrap();

        store.reset().unwrap();
        assert_eq!(store.counts().unwrap(), (0, 0, 0));
        assert_eq!(store.insert_agent("PassiveAgent").unwrap(), AgentId(1));
    }
}
