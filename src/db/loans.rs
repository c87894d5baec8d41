use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::LentBook;

/// Return the member id holding the given book, if any loan row exists. The
/// row's existence is the sole "currently lent" signal; there is no status
/// flag on the book itself.
pub fn find_loan_for_book(conn: &Connection, book_id: i64) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT member_id FROM lend_books WHERE book_id = ?1",
        params![book_id],
        |row| row.get(0),
    )
    .optional()
    .context("failed to query loan for book")
}

/// Record that a book is lent to a member.
pub fn insert_loan(conn: &Connection, book_id: i64, member_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO lend_books (book_id, member_id) VALUES (?1, ?2)",
        params![book_id, member_id],
    )
    .context("failed to insert loan")?;
    Ok(())
}

/// Delete the loan row for a book, returning whether one existed.
pub fn delete_loan(conn: &Connection, book_id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM lend_books WHERE book_id = ?1", params![book_id])
        .context("failed to delete loan")?;
    Ok(deleted > 0)
}

/// Join loans against books and members for the lent-books table: one
/// (title, first name, last name) tuple per active loan.
pub fn list_lent_books(conn: &Connection) -> Result<Vec<LentBook>> {
    let mut stmt = conn
        .prepare(
            "SELECT bo.title, me.first_name, me.last_name
             FROM books AS bo
             JOIN lend_books ON lend_books.book_id = bo.id
             JOIN members AS me ON lend_books.member_id = me.id",
        )
        .context("failed to prepare lent books query")?;

    let lent = stmt
        .query_map([], |row| {
            Ok(LentBook {
                title: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
            })
        })
        .context("failed to load lent books")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect lent books")?;

    Ok(lent)
}
