use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;

use super::MessageStore;
use crate::board::{Message, MessageId};

pub struct Database {
    pub conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_created
             ON messages(created_at)",
            [],
        )?;

        Ok(())
    }

    /// Stores a message with an explicit creation time.
    pub fn insert_at(&self, content: &str, created_at: DateTime<Utc>) -> Result<MessageId> {
        let conn = self.conn.lock();

        conn.execute(
            "INSERT INTO messages (content, created_at) VALUES (?1, ?2)",
            params![content, Message::stamp(&created_at)],
        )?;

        Ok(MessageId(conn.last_insert_rowid()))
    }

    fn row_to_message(row: &Row<'_>) -> rusqlite::Result<Message> {
        let id: i64 = row.get(0)?;
        let content: String = row.get(1)?;
        let created_at: String = row.get(2)?;

        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
            })?
            .with_timezone(&Utc);

        Ok(Message {
            id: MessageId(id),
            content,
            created_at,
        })
    }
}

impl MessageStore for Database {
    fn insert(&self, content: &str) -> Result<MessageId> {
        self.insert_at(content, Utc::now())
    }

    fn latest(&self) -> Result<Option<Message>> {
        let conn = self.conn.lock();

        conn.query_row(
            "SELECT id, content, created_at
             FROM messages
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
            [],
            Self::row_to_message,
        )
        .optional()
        .map_err(Into::into)
    }

    fn recent(&self, limit: usize) -> Result<Vec<Message>> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare(
            "SELECT id, content, created_at
             FROM messages
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let messages = stmt.query_map(params![limit], Self::row_to_message)?;

        Ok(messages.collect::<Result<Vec<_>, _>>()?)
    }

    fn count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;

        Ok(count as u64)
    }
}
