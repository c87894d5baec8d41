use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Book, NewBook};

fn book_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publisher: row.get(3)?,
        published_year: row.get(4)?,
        rating: row.get(5)?,
        isbn: row.get(6)?,
    })
}

/// Retrieve every book in storage order. The query doubles as the single
/// source of truth for how the catalog table is sorted in the UI.
pub fn list_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, author, publisher, published_year, rating, isbn
             FROM books",
        )
        .context("failed to prepare book query")?;

    let books = stmt
        .query_map([], book_from_row)
        .context("failed to load books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect books")?;

    Ok(books)
}

/// Look up a book by its unique ISBN. Used as the duplicate check before any
/// insert.
pub fn find_book_by_isbn(conn: &Connection, isbn: &str) -> Result<Option<Book>> {
    conn.query_row(
        "SELECT id, title, author, publisher, published_year, rating, isbn
         FROM books WHERE isbn = ?1",
        params![isbn],
        book_from_row,
    )
    .optional()
    .context("failed to query book by isbn")
}

/// Look up a book by title. Titles are not unique, so the lowest id wins and
/// every title-keyed operation resolves through this exact query.
pub fn find_book_by_title(conn: &Connection, title: &str) -> Result<Option<Book>> {
    conn.query_row(
        "SELECT id, title, author, publisher, published_year, rating, isbn
         FROM books WHERE title = ?1 ORDER BY id LIMIT 1",
        params![title],
        book_from_row,
    )
    .optional()
    .context("failed to query book by title")
}

/// Insert a new book row, returning the hydrated struct so the caller can
/// push it straight into the in-memory list.
pub fn insert_book(conn: &Connection, book: &NewBook) -> Result<Book> {
    conn.execute(
        "INSERT INTO books (title, author, publisher, published_year, rating, isbn)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            book.title,
            book.author,
            book.publisher,
            book.published_year,
            book.rating,
            book.isbn
        ],
    )
    .context("failed to insert book")?;

    let id = conn.last_insert_rowid();
    Ok(Book {
        id,
        title: book.title.clone(),
        author: book.author.clone(),
        publisher: book.publisher.clone(),
        published_year: book.published_year,
        rating: book.rating,
        isbn: book.isbn.clone(),
    })
}

/// Remove a book row by id. The schema cascades to `lend_books`, so an active
/// loan disappears with the book.
pub fn delete_book(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM books WHERE id = ?1", params![id])
        .context("failed to delete book")?;
    Ok(deleted > 0)
}
