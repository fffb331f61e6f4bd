//! # msgboard - Minimal Message Board
//!
//! A home page showing the most recent message and a form page that stores a
//! new one, backed by SQLite and rendered server-side.
//!
//! ## Routes
//!
//! - `GET /` - latest message, or an empty state
//! - `GET /form` - empty submission form
//! - `POST /form` - stores the `content` field and redirects to `/`
//! - `GET /health` - liveness probe
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msgboard::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     server::start(&config).await
//! }
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod storage;

// Re-export main types for library consumers
pub use board::{Message, MessageId};
pub use config::Config;
pub use error::BoardError;
pub use storage::{Database, MessageStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
