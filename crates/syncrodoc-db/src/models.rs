/// Database row types — these map directly to SQLite rows.
/// Distinct from the syncrodoc-types API models to keep the DB layer
/// independent; in particular the password hash never leaves this layer
/// except for verification.
#[derive(Debug)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
}
