//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "PAGENOTE_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Notes database path
    pub db: Option<PathBuf>,

    /// Log filter directive, e.g. "pagenote=debug"
    pub log: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$PAGENOTE_CONFIG` if set, otherwise `~/.config/pagenote/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagenote")
            .join("config.toml")
    }

    /// Resolve the notes database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `db` setting
    /// 3. `notes.db` in the platform data directory
    pub fn db_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.db.clone())
            .unwrap_or_else(default_db_path)
    }
}

/// Returns `<data dir>/pagenote/notes.db`.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagenote")
        .join("notes.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_db() {
        let config = Config::default();
        assert!(config.db.is_none());
        assert!(config.log.is_none());
    }

    #[test]
    fn db_path_prefers_cli_arg() {
        let config = Config {
            db: Some(PathBuf::from("/config/notes.db")),
            log: None,
        };
        let cli_db = PathBuf::from("/cli/notes.db");
        assert_eq!(config.db_path(Some(&cli_db)), PathBuf::from("/cli/notes.db"));
    }

    #[test]
    fn db_path_falls_back_to_config() {
        let config = Config {
            db: Some(PathBuf::from("/config/notes.db")),
            log: None,
        };
        assert_eq!(config.db_path(None), PathBuf::from("/config/notes.db"));
    }

    #[test]
    fn db_path_falls_back_to_data_dir() {
        let config = Config::default();
        assert!(config.db_path(None).ends_with("pagenote/notes.db"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.db.is_none());
    }

    #[test]
    fn parses_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "db = \"/tmp/pn.db\"\nlog = \"pagenote=debug\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.db, Some(PathBuf::from("/tmp/pn.db")));
        assert_eq!(config.log.as_deref(), Some("pagenote=debug"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "dir = \"/notes\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }
}
