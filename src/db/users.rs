use rusqlite::{params, Connection, Error as SqlError, ErrorCode, OptionalExtension};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::User;

/// Insert a new account. A second registration for the same username is
/// reported as `DuplicateUser` rather than a storage failure.
pub fn register_user(conn: &Connection, username: &str, password: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        params![username, password],
    )
    .map_err(|err| map_unique_constraint(err, username))?;

    debug!(username, "Registered user");
    Ok(User {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Whether a row with exactly this username and password exists.
pub fn authenticate(conn: &Connection, username: &str, password: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM users WHERE username = ?1 AND password = ?2",
            params![username, password],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// The primary key on `username` is the only constraint this table has, so
/// any constraint violation means the name is taken.
fn map_unique_constraint(err: SqlError, username: &str) -> Error {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        Error::DuplicateUser(username.to_string())
    } else {
        err.into()
    }
}
