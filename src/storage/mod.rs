pub mod db;

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::board::{Message, MessageId};

pub use db::Database;

/// Repository of board messages.
///
/// Calls block; async callers go through `tokio::task::spawn_blocking`.
pub trait MessageStore: Send + Sync {
    /// Stores `content` stamped with the current UTC time.
    fn insert(&self, content: &str) -> Result<MessageId>;

    /// Most recently created message. Equal timestamps resolve to the later insert.
    fn latest(&self) -> Result<Option<Message>>;

    /// Up to `limit` messages, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<Message>>;

    fn count(&self) -> Result<u64>;
}

/// Opens the database at `path`, creating parent directories and the schema.
pub async fn init(path: &Path) -> Result<Database> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let db = Database::new(path)?;
    db.initialize()?;

    Ok(db)
}

pub async fn post(path: &Path, content: &str) -> Result<MessageId> {
    let db = init(path).await?;
    let content = content.to_string();

    tokio::task::spawn_blocking(move || db.insert(&content)).await?
}

pub async fn show_latest(path: &Path) -> Result<()> {
    let db = init(path).await?;

    match tokio::task::spawn_blocking(move || db.latest()).await?? {
        Some(message) => print_message(&message),
        None => println!("{}", "No messages yet.".bright_black()),
    }

    Ok(())
}

pub async fn show_log(path: &Path, limit: usize) -> Result<()> {
    let db = init(path).await?;
    let messages = tokio::task::spawn_blocking(move || db.recent(limit)).await??;

    println!("{}", "Message Log".cyan().bold());
    println!("{}", "═".repeat(80).bright_black());

    for message in &messages {
        print_message(message);
    }

    Ok(())
}

fn print_message(message: &Message) {
    println!(
        "{} {} {}",
        format!("[{}]", message.posted_at()).bright_black(),
        message.content.bright_white(),
        format!("({})", message.id).bright_black()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/data/board.db");

        init(&path).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_post_goes_through_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.db");

        let first = post(&path, "one").await.unwrap();
        let second = post(&path, "two").await.unwrap();
        assert!(second > first);

        let db = init(&path).await.unwrap();
        assert_eq!(db.count().unwrap(), 2);
        assert_eq!(db.latest().unwrap().unwrap().content, "two");
    }
}
