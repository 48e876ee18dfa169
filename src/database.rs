use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

const CREATE_USERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT NOT NULL
)";

pub(crate) const CREATE_MOVIES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    rating REAL NOT NULL DEFAULT 0.0,
    poster_url TEXT,
    comment TEXT DEFAULT '',
    UNIQUE (user_id, title)
)";

/// Handle to the embedded database file. Opened once at startup and borrowed
/// by every registry and store operation; each operation holds the
/// connection only for the span of that single call.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file and make sure both tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| crate::Error::Output {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute(CREATE_USERS_TABLE, [])?;
        conn.execute(CREATE_MOVIES_TABLE, [])?;
        debug!(path = %path.display(), "opened movie database");
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// An in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(CREATE_USERS_TABLE, [])?;
        conn.execute(CREATE_MOVIES_TABLE, [])?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Run one operation against the connection. The guard is released on
    /// every exit path, including errors; a poisoned lock is recovered since
    /// the connection itself stays valid across a panicked caller.
    pub(crate) fn with_conn<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let mut conn = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        op(&mut conn)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_open_creates_both_tables() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            let tables: Vec<String> = conn
                .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?
                .query_map([], |row| row.get(0))?
                .collect::<rusqlite::Result<_>>()?;
            assert!(tables.contains(&"users".to_owned()));
            assert!(tables.contains(&"movies".to_owned()));
            Ok(())
        })
        .unwrap();
    }
}
