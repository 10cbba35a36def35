//! Key-value store backed by the `kv_store` table.

use super::Database;
use crate::errors::{AppResult, DatabaseError};
use crate::quota::KeyValueStore;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// SQLite implementation of [`KeyValueStore`].
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Wraps an opened database. The schema must already be initialized.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.db.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(DatabaseError::Sqlite)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        debug!("Writing key {}", key);
        let conn = self.db.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![key, value],
        )
        .map_err(DatabaseError::Sqlite)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let db = Database::open_in_memory().unwrap();
        db.initialize_schema().unwrap();
        SqliteStore::new(db)
    }

    #[test]
    fn test_get_missing_key() {
        assert_eq!(store().get("absent").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = store();
        store.set("ai_analysis_u1_2024-05-01", "2024-05-01T08:00:00Z").unwrap();
        assert_eq!(
            store.get("ai_analysis_u1_2024-05-01").unwrap().as_deref(),
            Some("2024-05-01T08:00:00Z")
        );
    }

    #[test]
    fn test_set_twice_last_write_wins() {
        let store = store();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));

        let conn = store.db.get_conn().unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let store = SqliteStore::new(Database::open_in_memory().unwrap());
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
    }
}
