//! KeySpace implementation for SqliteKeySpace.

use super::SqliteKeySpace;
use crate::store::{KeySpace, StoreError, StoreResult};
use rusqlite::{OptionalExtension, params};
use serde_json::Value;

impl KeySpace for SqliteKeySpace {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let text: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;

        text.map(|text| {
            serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        let text = serde_json::to_string(&value)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn entries(&self) -> StoreResult<Vec<(String, Value)>> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, text) = row?;
            match serde_json::from_str(&text) {
                Ok(value) => entries.push((key, value)),
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping undecodable entry")
                }
            }
        }
        Ok(entries)
    }
}
