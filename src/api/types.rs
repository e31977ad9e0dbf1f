//! Shared state for the API layer.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::db::{sqlite, DatabaseError};

/// Shared context for all API routes.
///
/// A single SQLite connection behind a mutex; requests serialize on it,
/// which makes concurrent upserts on the same verification number
/// last-write-wins at row granularity.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open (and migrate) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self::new(sqlite::open_database(path)?))
    }

    /// In-memory context for tests.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::new(sqlite::open_memory_database()?))
    }

    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_opens_in_memory() {
        let ctx = ApiContext::open_in_memory().unwrap();
        let conn = ctx.lock_db().unwrap();
        assert_eq!(sqlite::get_current_version(&conn), 1);
    }

    #[test]
    fn context_is_cloneable_and_shares_the_connection() {
        let ctx = ApiContext::open_in_memory().unwrap();
        let clone = ctx.clone();
        {
            let conn = ctx.lock_db().unwrap();
            conn.execute(
                "INSERT INTO dogs (id, name, breed, color, created_at)
                 VALUES ('d1', 'Rex', 'Bulldog', NULL, '2025-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
        }
        let conn = clone.lock_db().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM dogs", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
