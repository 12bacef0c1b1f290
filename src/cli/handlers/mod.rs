//! Command handlers for the CLI.

mod canon;
mod completions;
mod export;
mod host;
mod notes;
mod quota;


use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::PathBuf;

use crate::domain::{CanonicalId, canonicalize};
use crate::store::{KeySpace, MemoryKeySpace, NoteStore, SqliteKeySpace};

// Re-export public items
pub use canon::handle_canon;
pub use completions::handle_completions;
pub use export::handle_export;
pub use host::handle_host;
pub use notes::{handle_get, handle_list, handle_remove, handle_save};
pub use quota::handle_quota;

// Re-export for tests
#[cfg(test)]
pub(crate) use notes::select_notes;

// ===========================================
// Shared Utilities
// ===========================================

/// Note store over whichever backend the command line selected.
pub type Store = NoteStore<Box<dyn KeySpace>>;

/// Where the notes live for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Discarded when the process exits.
    Memory,
    File(PathBuf),
}

/// Opens the note store at `location`.
pub fn open_store(location: &StoreLocation) -> Result<Store> {
    let keyspace: Box<dyn KeySpace> = match location {
        StoreLocation::Memory => Box::new(MemoryKeySpace::new()),
        StoreLocation::File(path) => Box::new(
            SqliteKeySpace::open(path)
                .with_context(|| format!("failed to open notes database at {}", path.display()))?,
        ),
    };
    tracing::debug!(?location, "opened note store");
    Ok(NoteStore::new(keyspace))
}

/// Canonicalizes a URL given on the command line.
pub(crate) fn resolve_id(url: &str) -> Result<CanonicalId> {
    match canonicalize(url) {
        Some(id) => Ok(id),
        None => bail!("unidentifiable URL: '{}'", url),
    }
}

/// Reads note content from `reader`, treating empty input as "no content".
pub(crate) fn read_content<R: Read>(mut reader: R) -> Result<Option<String>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("failed to read note content from stdin")?;
    Ok((!content.is_empty()).then_some(content))
}
