//! Isolated test environment with temp directory.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use super::PagenoteCommand;
use pagenote::domain::{NoteUpdate, canonicalize};
use pagenote::store::{KeySpace, NoteStore, SqliteKeySpace};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database and config file.
///
/// Creates a temp directory that is automatically cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the temp directory
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the path to the temp directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the notes database.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("notes.db")
    }

    /// Returns the path of the config file the binary is pointed at.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes the config file.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Saves a note directly through the library.
    pub fn seed_note(&self, url: &str, title: &str, content: &str) {
        let id = canonicalize(url).expect("seed URL should canonicalize");
        let keyspace = SqliteKeySpace::open(&self.db_path()).expect("Failed to open database");
        let mut store = NoteStore::new(keyspace);
        store
            .upsert(&id, url, NoteUpdate::content(content).with_title(title))
            .expect("Failed to seed note");
    }

    /// Stores a non-note record directly in the key space.
    pub fn seed_raw(&self, key: &str, value: Value) {
        let mut keyspace =
            SqliteKeySpace::open(&self.db_path()).expect("Failed to open database");
        keyspace.set(key, value).expect("Failed to seed record");
    }

    /// Creates a command configured for this test environment.
    pub fn cmd(&self) -> PagenoteCommand {
        PagenoteCommand::new()
            .config(&self.config_path())
            .db(&self.db_path())
    }

    /// Creates a command using only the config file (no `--db`).
    pub fn cmd_without_db(&self) -> PagenoteCommand {
        PagenoteCommand::new().config(&self.config_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_seed_creates_database() {
        let env = TestEnv::new();
        env.seed_note("https://example.com/a", "A", "body");
        assert!(env.db_path().exists());
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
    }
}
