//! Persistence: the shared key space, note records, and quota reporting

mod keyspace;
mod memory;
mod notes;
mod quota;
mod record;
mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

pub use keyspace::{KeySpace, StoreError, StoreResult};
pub use memory::MemoryKeySpace;
pub use notes::NoteStore;
pub use quota::{NEAR_LIMIT_PERCENT, QUOTA_BYTES, QuotaMonitor, QuotaReport, serialized_size};
pub use sqlite::SqliteKeySpace;
