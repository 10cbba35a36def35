//! SQLite persistence for daily quota markers.
//!
//! This module provides the SQLite database backing the key-value store used
//! by the rate limiter. It uses connection pooling via r2d2 so the store can be
//! shared across threads.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `kv`: Key-value store on top of the `kv_store` table
//!
//! # Example
//!
//! ```no_run
//! use serene::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/serene.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod kv;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub use kv::SqliteStore;

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(5)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection so every caller sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be initialized.
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(DatabaseError::Pool)?;
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Schema creation fails
    /// - The file was written by a newer schema version
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;

        let version = schema::get_schema_version(&conn)?;
        if version > schema::SCHEMA_VERSION {
            return Err(DatabaseError::Custom(format!(
                "Database schema version {} is newer than supported version {}",
                version,
                schema::SCHEMA_VERSION
            ))
            .into());
        }

        info!("Database schema initialized (version {})", version);
        Ok(())
    }
}

/// Connection customizer applying per-connection pragmas.
#[derive(Debug)]
struct SqlitePragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        // Concurrent CLI invocations may touch the same file.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(())
    }
}
