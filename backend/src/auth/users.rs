//! User records, keyed by username.
//!
//! [`SqliteUserStore`] opens the database file for each operation, the same
//! way the rest of the server treats its on-disk state.

use super::AuthError;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    /// Output of [`super::password::hash_password`].
    pub password_hash: String,
}

pub trait UserStore: Send + Sync {
    fn find(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;

    /// Inserts a new user. Fails with [`AuthError::UserExists`] if the
    /// username is taken; the existing record is left untouched.
    fn insert(&self, record: &UserRecord) -> Result<(), AuthError>;
}

pub struct SqliteUserStore {
    path: PathBuf,
}

impl SqliteUserStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// `users` table exists.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let store = Self { path: path.into() };
        store.connect()?.execute(
            "CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL
            )",
            [],
        )?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, AuthError> {
        Ok(Connection::open(&self.path)?)
    }
}

impl UserStore for SqliteUserStore {
    fn find(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let conn = self.connect()?;
        let record = conn
            .query_row(
                "SELECT username, password FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserRecord {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn insert(&self, record: &UserRecord) -> Result<(), AuthError> {
        let conn = self.connect()?;
        match conn.execute(
            "INSERT INTO users (username, password) VALUES (?1, ?2)",
            params![record.username, record.password_hash],
        ) {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(AuthError::UserExists)
            }
            Err(e) => Err(AuthError::Store(e)),
        }
    }
}
