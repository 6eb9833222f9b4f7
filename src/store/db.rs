// SPDX-License-Identifier: MPL-2.0

use crate::store::StoreError;
use crate::store::schema::SCHEMA;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle to the photogram database
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl Store {
    /// Open or create the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Path(format!("failed to create data dir: {}", e)))?;
        }

        let conn = Connection::open(path)?;
        Self::migrate(&conn)?;
        tracing::debug!(path = %path.display(), "opened store");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Private, throwaway database. Used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Run schema migrations
    fn migrate(conn: &Connection) -> Result<(), StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        // All CREATE IF NOT EXISTS
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Location on disk, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Access connection for operations
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn now() -> DateTime<Utc> {
        Utc::now()
    }
}
