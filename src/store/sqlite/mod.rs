//! SQLite-backed key space.

mod connection;
mod keyspace_impl;
mod schema;


use rusqlite::Connection;

pub use schema::{SCHEMA_VERSION, create_schema};

/// SQLite-backed key space.
///
/// Stores every entry as a row of `(key, JSON text)` in a single table.
pub struct SqliteKeySpace {
    pub(crate) conn: Connection,
}
