use rusqlite::{OptionalExtension, Row};

use crate::models::UserRow;
use crate::{Database, StoreError};

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

impl Database {
    /// Insert a new user and return the stored row. A username or email
    /// collision surfaces as `StoreError::Duplicate` straight from the
    /// UNIQUE constraint; there is deliberately no pre-check.
    pub fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)
                 RETURNING id, username, email, password, created_at",
                (username, email, password_hash),
                row_to_user,
            )
            .map_err(StoreError::from)
        })
    }

    /// Look a user up by username or email with a single identifier, the way
    /// the login form accepts either.
    pub fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRow>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, username, email, password, created_at FROM users
                 WHERE username = ?1 OR email = ?1",
                [identifier],
                row_to_user,
            )
            .optional()
            .map_err(StoreError::from)
        })
    }
}
