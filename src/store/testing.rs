//! Key space doubles for exercising storage failures.

use super::{KeySpace, MemoryKeySpace, StoreError, StoreResult};
use serde_json::Value;
use std::io;
use std::path::PathBuf;

/// The error every failing operation returns.
fn disk_full() -> StoreError {
    StoreError::Io {
        path: PathBuf::from("notes.db"),
        source: io::Error::other("disk full"),
    }
}

/// A key space whose writes, and optionally reads, fail.
pub(crate) struct FailingKeySpace {
    inner: MemoryKeySpace,
    fail_reads: bool,
}

impl FailingKeySpace {
    /// Reads succeed against `inner`; every write fails.
    pub(crate) fn read_only(inner: MemoryKeySpace) -> Self {
        Self {
            inner,
            fail_reads: false,
        }
    }

    /// Every operation fails.
    pub(crate) fn unreadable() -> Self {
        Self {
            inner: MemoryKeySpace::new(),
            fail_reads: true,
        }
    }
}

impl KeySpace for FailingKeySpace {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        if self.fail_reads {
            return Err(disk_full());
        }
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: Value) -> StoreResult<()> {
        Err(disk_full())
    }

    fn remove(&mut self, _key: &str) -> StoreResult<()> {
        Err(disk_full())
    }

    fn entries(&self) -> StoreResult<Vec<(String, Value)>> {
        if self.fail_reads {
            return Err(disk_full());
        }
        self.inner.entries()
    }
}
