use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".daisy-library";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "library.sqlite";

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection. The connection is opened exactly once at startup and handed to
/// the library service for the process lifetime.
pub fn ensure_schema() -> Result<Connection> {
    let db_path = data_dir()?.join(DB_FILE_NAME);

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(&db_path).context("failed to open SQLite database")?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Create the three catalog tables if they are missing and switch on foreign
/// key enforcement so the cascades in our schema behave the same during tests
/// and production runs. Shared by `ensure_schema` and the in-memory test
/// databases.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            publisher TEXT NOT NULL,
            published_year INTEGER NOT NULL,
            rating REAL NOT NULL,
            isbn TEXT NOT NULL UNIQUE
        )",
        [],
    )
    .context("failed to create books table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            gender TEXT NOT NULL,
            state TEXT NOT NULL,
            member_no TEXT NOT NULL UNIQUE
        )",
        [],
    )
    .context("failed to create members table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS lend_books (
            book_id INTEGER NOT NULL,
            member_id INTEGER NOT NULL,
            PRIMARY KEY (book_id, member_id),
            FOREIGN KEY(book_id) REFERENCES books(id) ON DELETE CASCADE,
            FOREIGN KEY(member_id) REFERENCES members(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("failed to create lend_books table")?;

    Ok(())
}

/// Resolve the application data directory inside the user's home. The log
/// file and the materialized about page live next to the database.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
