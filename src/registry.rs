//! The user registry: the table of known users. Every movie namespace is
//! addressed by a `user_id` issued here, so callers resolve users through
//! this module before touching the record store.

use rusqlite::params;
use tracing::{debug, warn};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::models::{user_from_row, User};

/// All known users, id-ascending so menu numbering is stable between runs.
pub fn list_users(db: &Database) -> Result<Vec<User>> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT user_id, user_name FROM users ORDER BY user_id")?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<User>>>()?;
        Ok(users)
    })
}

/// Create a user and provision their movie namespace. Returns the fresh id.
pub fn add_user(db: &Database, name: &str) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation("user name must not be empty".to_owned()));
    }
    let user_id = db.with_conn(|conn| {
        conn.execute("INSERT INTO users (user_name) VALUES (?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    })?;
    crate::store::ensure_namespace(db, user_id)?;
    debug!(user_id, name, "added user");
    Ok(user_id)
}

pub fn rename_user(db: &Database, user_id: i64, new_name: &str) -> Result<()> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(Error::Validation("user name must not be empty".to_owned()));
    }
    db.with_conn(|conn| {
        let affected = conn.execute(
            "UPDATE users SET user_name = ?1 WHERE user_id = ?2",
            params![new_name, user_id],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        Ok(())
    })
}

/// Remove a user together with their movie rows, atomically. Keeping the
/// rows would leave movie data without an owning user, which the data model
/// forbids.
pub fn delete_user(db: &Database, user_id: i64) -> Result<()> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        let purged = tx.execute("DELETE FROM movies WHERE user_id = ?1", params![user_id])?;
        let affected = tx.execute("DELETE FROM users WHERE user_id = ?1", params![user_id])?;
        if affected == 0 {
            // Rolls back the purge when the user never existed.
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        tx.commit()?;
        if purged > 0 {
            warn!(user_id, purged, "deleted user and purged their movies");
        } else {
            debug!(user_id, "deleted user");
        }
        Ok(())
    })
}

pub fn resolve_user(db: &Database, user_id: i64) -> Result<String> {
    db.with_conn(|conn| {
        match conn.query_row(
            "SELECT user_name FROM users WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        ) {
            Ok(name) => Ok(name),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(Error::NotFound(format!("user {user_id}")))
            }
            Err(err) => Err(err.into()),
        }
    })
}
