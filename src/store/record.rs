//! Tagged envelope for records persisted in the shared key space.
//!
//! Every note is stored as `{"kind": "note", "schema": 1, ...note fields}`.
//! Entries without a `kind` are read as notes only when they carry a string
//! `id`, which is how the unenveloped format marked them; anything else
//! belongs to someone else and is skipped.

use super::{StoreError, StoreResult};
use crate::domain::Note;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version written into new envelopes.
pub const SCHEMA_VERSION: u32 = 1;

const KIND_FIELD: &str = "kind";
const NOTE_KIND: &str = "note";

#[derive(Serialize)]
struct NoteEnvelopeRef<'a> {
    kind: &'static str,
    schema: u32,
    #[serde(flatten)]
    note: &'a Note,
}

#[derive(Deserialize)]
struct NoteEnvelope {
    #[serde(default = "legacy_schema")]
    schema: u32,
    #[serde(flatten)]
    note: Note,
}

fn legacy_schema() -> u32 {
    0
}

/// Wraps a note in its persisted envelope.
pub fn encode_note(note: &Note) -> StoreResult<Value> {
    Ok(serde_json::to_value(NoteEnvelopeRef {
        kind: NOTE_KIND,
        schema: SCHEMA_VERSION,
        note,
    })?)
}

/// Reads the note stored under `key`.
///
/// Returns `Ok(None)` for records of another kind, and an error when the
/// entry claims to be a note but cannot be decoded.
pub fn decode_note(key: &str, value: Value) -> StoreResult<Option<Note>> {
    if !is_note_record(&value) {
        return Ok(None);
    }

    let envelope: NoteEnvelope =
        serde_json::from_value(value).map_err(|source| StoreError::Malformed {
            key: key.to_string(),
            source,
        })?;

    if envelope.schema > SCHEMA_VERSION {
        tracing::debug!(
            key,
            schema = envelope.schema,
            "reading note written by a newer schema"
        );
    }

    Ok(Some(envelope.note))
}

/// Returns true if the value is a note, enveloped or legacy.
pub fn is_note_record(value: &Value) -> bool {
    match value.get(KIND_FIELD) {
        Some(kind) => kind.as_str() == Some(NOTE_KIND),
        None => value.get("id").is_some_and(Value::is_string),
    }
}
