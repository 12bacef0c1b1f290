//! NoteStore: note records over a shared key space.

use super::record::{decode_note, encode_note, is_note_record};
use super::{KeySpace, StoreError, StoreResult};
use crate::domain::{CanonicalId, Note, NoteUpdate};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Note persistence keyed by canonical identity.
///
/// Holds at most one note per identity. Other records sharing the key space
/// are left untouched and never surface as notes.
pub struct NoteStore<K> {
    keyspace: K,
}

impl<K: KeySpace> NoteStore<K> {
    /// Creates a store over the given key space.
    pub fn new(keyspace: K) -> Self {
        Self { keyspace }
    }

    /// Returns the underlying key space.
    pub fn keyspace(&self) -> &K {
        &self.keyspace
    }

    /// Returns a mutable reference to the underlying key space.
    pub fn keyspace_mut(&mut self) -> &mut K {
        &mut self.keyspace
    }

    /// Consumes the store, returning the key space.
    pub fn into_inner(self) -> K {
        self.keyspace
    }

    /// Returns the note for `id`, if one exists.
    pub fn get(&self, id: &CanonicalId) -> StoreResult<Option<Note>> {
        match self.keyspace.get(id.as_str())? {
            Some(value) => decode_note(id.as_str(), value),
            None => Ok(None),
        }
    }

    /// Creates or merges the note for `id`, stamped with the current time.
    ///
    /// See [`NoteStore::upsert_at`].
    pub fn upsert(
        &mut self,
        id: &CanonicalId,
        original_url: &str,
        update: NoteUpdate,
    ) -> StoreResult<Note> {
        self.upsert_at(id, original_url, update, Utc::now())
    }

    /// Creates or merges the note for `id` as of `now`.
    ///
    /// An existing note keeps its `created` time and aliases; `original_url`
    /// is added as an alias when it differs from `id`. A key holding some
    /// other kind of record is left untouched and yields
    /// [`StoreError::Occupied`].
    pub fn upsert_at(
        &mut self,
        id: &CanonicalId,
        original_url: &str,
        update: NoteUpdate,
        now: DateTime<Utc>,
    ) -> StoreResult<Note> {
        let existing = match self.keyspace.get(id.as_str())? {
            Some(value) if !is_note_record(&value) => {
                return Err(StoreError::Occupied {
                    key: id.to_string(),
                });
            }
            Some(value) => decode_note(id.as_str(), value)?,
            None => None,
        };

        let note = match existing {
            Some(mut existing) => {
                existing.apply(original_url, update, now);
                existing
            }
            None => Note::create(id.clone(), original_url, update, now),
        };

        self.keyspace.set(id.as_str(), encode_note(&note)?)?;
        Ok(note)
    }

    /// Removes the note for `id`. Removing a missing note succeeds.
    ///
    /// Keys that hold some other kind of record are left alone.
    pub fn remove(&mut self, id: &CanonicalId) -> StoreResult<()> {
        match self.keyspace.get(id.as_str())? {
            Some(value) if is_note_record(&value) => {
                self.keyspace.remove(id.as_str())
            }
            _ => Ok(()),
        }
    }

    /// Returns every note, most recently updated first.
    ///
    /// Undecodable note entries are logged and skipped.
    pub fn list_all(&self) -> StoreResult<Vec<Note>> {
        let mut notes = Vec::new();
        for (key, value) in self.keyspace.entries()? {
            match decode_note(&key, value) {
                Ok(Some(note)) => notes.push(note),
                Ok(None) => {}
                Err(err) => tracing::warn!(key = %key, error = %err, "skipping unreadable note"),
            }
        }
        notes.sort_by(|a, b| b.updated().cmp(&a.updated()).then_with(|| a.id().cmp(b.id())));
        Ok(notes)
    }

    /// Returns all notes as a pretty-printed JSON object keyed by identity.
    pub fn export_json(&self) -> StoreResult<String> {
        let notes = self.list_all()?;
        let by_id: BTreeMap<&str, &Note> =
            notes.iter().map(|note| (note.id().as_str(), note)).collect();
        Ok(serde_json::to_string_pretty(&by_id)?)
    }
}
