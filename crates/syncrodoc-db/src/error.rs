use thiserror::Error;

/// Store failures the auth flow has to tell apart: a UNIQUE violation maps to
/// the generic duplicate-identity response, everything else is a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    /// UNIQUE constraint violation on username or email. The constraint is
    /// enforced by SQLite itself, so concurrent inserts cannot both pass.
    #[error("username or email already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("database lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::Duplicate
            }
            _ => StoreError::Sqlite(err),
        }
    }
}
