//! Board configuration
//!
//! Resolved in layers: built-in defaults, then an optional TOML file, then
//! `MSGBOARD_*` environment variables (a `.env` file is honoured), then
//! command-line flags applied by the binary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "msgboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind: String,

    /// SQLite database file.
    pub database: PathBuf,

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log: String,

    /// When set, logs go to a daily-rolling file in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            database: PathBuf::from("msgboard.db"),
            log: "info".to_string(),
            log_dir: None,
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bind: Option<String>,
    database: Option<PathBuf>,
    log: Option<String>,
    log_dir: Option<PathBuf>,
}

impl Config {
    /// Loads defaults, the config file and the environment.
    ///
    /// An explicitly given `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        match path {
            Some(path) => config.merge_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    config.merge_file(default)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok());

        Ok(config)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        self.merge_toml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn merge_toml(&mut self, text: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(text)?;

        if let Some(bind) = file.bind {
            self.bind = bind;
        }
        if let Some(database) = file.database {
            self.database = database;
        }
        if let Some(log) = file.log {
            self.log = log;
        }
        if file.log_dir.is_some() {
            self.log_dir = file.log_dir;
        }

        Ok(())
    }

    /// Applies `MSGBOARD_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = lookup("MSGBOARD_BIND") {
            self.bind = bind;
        }
        if let Some(database) = lookup("MSGBOARD_DATABASE") {
            self.database = PathBuf::from(database);
        }
        if let Some(log) = lookup("MSGBOARD_LOG") {
            self.log = log;
        }
        if let Some(dir) = lookup("MSGBOARD_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.database, PathBuf::from("msgboard.db"));
        assert_eq!(config.log, "info");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_toml_overrides_only_given_keys() {
        let mut config = Config::default();
        config
            .merge_toml("bind = \"0.0.0.0:9000\"\nlog_dir = \"logs\"\n")
            .unwrap();

        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(config.database, PathBuf::from("msgboard.db"));
    }

    #[test]
    fn test_unknown_toml_key_is_rejected() {
        let mut config = Config::default();

        assert!(config.merge_toml("port = 80\n").is_err());
    }

    #[test]
    fn test_env_wins_over_file() {
        let mut config = Config::default();
        config.merge_toml("database = \"from-file.db\"\n").unwrap();

        let env: HashMap<&str, &str> = [
            ("MSGBOARD_DATABASE", "from-env.db"),
            ("MSGBOARD_LOG", "debug,tower_http=warn"),
            ("MSGBOARD_BIND", "   "),
        ]
        .into_iter()
        .collect();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database, PathBuf::from("from-env.db"));
        assert_eq!(config.log, "debug,tower_http=warn");
        assert_eq!(config.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();

        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_merge_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.toml");
        std::fs::write(&path, "bind = \"127.0.0.1:3000\"\n").unwrap();

        let mut config = Config::default();
        config.merge_file(&path).unwrap();

        assert_eq!(config.bind, "127.0.0.1:3000");
    }
}
