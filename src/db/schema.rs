//! Database schema definitions and initialization.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Tables
///
/// - `kv_store`: String key-value pairs (daily quota markers)
/// - `schema_version`: Singleton holding the schema version
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    // Key-value table: quota markers are never deleted, keys are date scoped
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (id, version) VALUES (1, ?1)",
        [SCHEMA_VERSION],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Reads the stored schema version.
///
/// # Errors
///
/// Returns an error if the table is missing or the query fails.
pub fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    conn.query_row(
        "SELECT version FROM schema_version WHERE id = 1",
        [],
        |row| row.get(0),
    )
    .map_err(|e| DatabaseError::Sqlite(e).into())
}
