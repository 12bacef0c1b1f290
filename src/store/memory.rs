//! In-memory key space.

use super::{KeySpace, StoreResult};
use serde_json::Value;
use std::collections::BTreeMap;

/// A key space held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeySpace {
    entries: BTreeMap<String, Value>,
}

impl MemoryKeySpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeySpace for MemoryKeySpace {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn entries(&self) -> StoreResult<Vec<(String, Value)>> {
        Ok(self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
