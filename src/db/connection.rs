use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Open (creating if needed) the SQLite file at `path` and make sure every
/// table exists. The parent directory is created on demand so a fresh install
/// works without any manual setup.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    info!(path = %path.display(), "Opened ledger database");
    Ok(conn)
}

/// Private in-memory store with the full schema. Handy for tests and demos.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the five ledger tables if they are missing. Safe to call on every
/// start-up.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            username TEXT PRIMARY KEY,
            password TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            value REAL NOT NULL,
            payment_method TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS purchases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            place TEXT NOT NULL,
            product TEXT NOT NULL,
            quantity REAL NOT NULL,
            value REAL NOT NULL
        )",
        [],
    )?;

    conn.execute("CREATE TABLE IF NOT EXISTS places (name TEXT UNIQUE)", [])?;
    conn.execute("CREATE TABLE IF NOT EXISTS products (name TEXT UNIQUE)", [])?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_sales_date ON sales (date)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_purchases_date ON purchases (date)",
        [],
    )?;

    debug!("Schema verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let names = table_names(&conn);
        for table in ["places", "products", "purchases", "sales", "users"] {
            assert!(names.iter().any(|n| n == table), "missing table {table}");
        }
    }

    #[test]
    fn open_database_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.sqlite");

        let conn = open_database(&path).unwrap();
        drop(conn);

        assert!(path.exists());
        // Re-opening an existing file keeps working.
        open_database(&path).unwrap();
    }
}
