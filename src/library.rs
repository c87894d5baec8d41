//! The library service: every read and write against the catalog store goes
//! through here. The service owns the single SQLite connection for the
//! process lifetime and enforces the uniqueness and existence rules the UI
//! relies on; the presentation layer never touches `db::` directly.

use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{info, warn};

use crate::db;
use crate::import;
use crate::models::{Book, ImportSummary, LentBook, Member, NewBook, NewMember};

/// Failure modes the UI translates into specific dialog messages. Not-found
/// and conflict stay distinct variants because the lend/return dialogs word
/// them differently.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("The book cannot be found.")]
    UnknownBook(String),
    #[error("The member cannot be found.")]
    UnknownMember(String),
    #[error("The book is already lent to another member.")]
    AlreadyLent(String),
    #[error("The book is already in the library.")]
    NotLent(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

/// Facade over the catalog store. Construction takes the connection by value
/// so there is exactly one owner and no hidden global handle.
pub struct Library {
    conn: Connection,
}

impl Library {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open the default on-disk database, creating the schema when missing.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(db::ensure_schema()?))
    }

    /// Add a book unless its ISBN is already in the catalog. A duplicate is
    /// skipped silently: the caller gets `false` and a log line, never an
    /// error, which is also what makes per-row import behave.
    pub fn add_book(&self, book: &NewBook) -> LibraryResult<bool> {
        if db::find_book_by_isbn(&self.conn, &book.isbn)?.is_some() {
            warn!(isbn = %book.isbn, title = %book.title, "skipping duplicate book");
            return Ok(false);
        }
        let added = db::insert_book(&self.conn, book)?;
        info!(id = added.id, title = %added.title, "book added");
        Ok(true)
    }

    /// Remove a book by title. The id is resolved once at entry (first match
    /// by lowest id when titles collide) and the delete cascades any active
    /// loan row.
    pub fn remove_book(&self, title: &str) -> LibraryResult<()> {
        let book = db::find_book_by_title(&self.conn, title)?
            .ok_or_else(|| LibraryError::UnknownBook(title.to_string()))?;
        db::delete_book(&self.conn, book.id)?;
        info!(id = book.id, title = %book.title, "book removed");
        Ok(())
    }

    /// Register a member unless the member number is already taken. Mirrors
    /// `add_book`: duplicate means `false` plus a log line.
    pub fn register_member(&self, member: &NewMember) -> LibraryResult<bool> {
        if db::find_member_by_number(&self.conn, &member.member_no)?.is_some() {
            warn!(member_no = %member.member_no, "skipping duplicate member");
            return Ok(false);
        }
        let added = db::insert_member(&self.conn, member)?;
        info!(id = added.id, member_no = %added.member_no, "member registered");
        Ok(true)
    }

    /// Remove a member by member number, cascading any loan rows they hold.
    pub fn remove_member(&self, member_no: &str) -> LibraryResult<()> {
        let member = db::find_member_by_number(&self.conn, member_no)?
            .ok_or_else(|| LibraryError::UnknownMember(member_no.to_string()))?;
        db::delete_member(&self.conn, member.id)?;
        info!(id = member.id, member_no = %member.member_no, "member removed");
        Ok(())
    }

    pub fn list_books(&self) -> LibraryResult<Vec<Book>> {
        Ok(db::list_books(&self.conn)?)
    }

    pub fn list_members(&self) -> LibraryResult<Vec<Member>> {
        Ok(db::list_members(&self.conn)?)
    }

    pub fn list_loans(&self) -> LibraryResult<Vec<LentBook>> {
        Ok(db::list_lent_books(&self.conn)?)
    }

    /// Detail lookup used by the UI for error disambiguation.
    pub fn find_book_by_title(&self, title: &str) -> LibraryResult<Option<Book>> {
        Ok(db::find_book_by_title(&self.conn, title)?)
    }

    /// Detail lookup used by the UI for error disambiguation.
    pub fn find_member_by_number(&self, member_no: &str) -> LibraryResult<Option<Member>> {
        Ok(db::find_member_by_number(&self.conn, member_no)?)
    }

    /// Lend a book to a member. Both keys are resolved first so an unknown
    /// book or member fails before any write; a book with an existing loan
    /// row fails with the distinct conflict variant.
    pub fn lend_book(&self, title: &str, member_no: &str) -> LibraryResult<()> {
        let book = db::find_book_by_title(&self.conn, title)?
            .ok_or_else(|| LibraryError::UnknownBook(title.to_string()))?;
        let member = db::find_member_by_number(&self.conn, member_no)?
            .ok_or_else(|| LibraryError::UnknownMember(member_no.to_string()))?;

        if db::find_loan_for_book(&self.conn, book.id)?.is_some() {
            return Err(LibraryError::AlreadyLent(book.title));
        }

        db::insert_loan(&self.conn, book.id, member.id)?;
        info!(book = %book.title, member_no = %member.member_no, "book lent");
        Ok(())
    }

    /// Return a lent book. Fails with `UnknownBook` when the title does not
    /// resolve and with `NotLent` when no loan row exists; the book row
    /// itself is untouched either way.
    pub fn return_book(&self, title: &str) -> LibraryResult<()> {
        let book = db::find_book_by_title(&self.conn, title)?
            .ok_or_else(|| LibraryError::UnknownBook(title.to_string()))?;

        if !db::delete_loan(&self.conn, book.id)? {
            return Err(LibraryError::NotLent(book.title));
        }

        info!(book = %book.title, "book returned");
        Ok(())
    }

    /// Bulk-add books from a header-driven CSV file. Each row goes through
    /// `add_book`, so the per-row uniqueness rule applies and duplicates are
    /// skipped without aborting the run. A malformed row stops the import;
    /// rows committed before it stay persisted.
    pub fn import_books_from_csv(&self, path: &Path) -> LibraryResult<ImportSummary> {
        let mut summary = ImportSummary::default();
        for book in import::read_books(path)? {
            if self.add_book(&book)? {
                summary.added += 1;
            } else {
                summary.skipped += 1;
            }
        }
        info!(added = summary.added, skipped = summary.skipped, "book import finished");
        Ok(summary)
    }

    /// Bulk-register members from a CSV file; same contract as the book
    /// import.
    pub fn import_members_from_csv(&self, path: &Path) -> LibraryResult<ImportSummary> {
        let mut summary = ImportSummary::default();
        for member in import::read_members(path)? {
            if self.register_member(&member)? {
                summary.added += 1;
            } else {
                summary.skipped += 1;
            }
        }
        info!(added = summary.added, skipped = summary.skipped, "member import finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::apply_schema;

    fn library() -> Library {
        let conn = Connection::open_in_memory().expect("in-memory database");
        apply_schema(&conn).expect("schema");
        Library::new(conn)
    }

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            publisher: "Ace".into(),
            published_year: 1965,
            rating: 4.5,
            isbn: "0441013597".into(),
        }
    }

    fn member(no: &str) -> NewMember {
        NewMember {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            gender: "F".into(),
            state: "CA".into(),
            member_no: no.into(),
        }
    }

    #[test]
    fn duplicate_isbn_keeps_first_row() {
        let lib = library();
        assert!(lib.add_book(&dune()).unwrap());

        let mut second = dune();
        second.title = "Dune (reissue)".into();
        assert!(!lib.add_book(&second).unwrap());

        let books = lib.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[test]
    fn remove_book_requires_existing_title() {
        let lib = library();
        assert!(matches!(
            lib.remove_book("Dune"),
            Err(LibraryError::UnknownBook(_))
        ));

        lib.add_book(&dune()).unwrap();
        lib.remove_book("Dune").unwrap();
        assert!(lib.list_books().unwrap().is_empty());
    }

    #[test]
    fn remove_member_requires_existing_number() {
        let lib = library();
        assert!(matches!(
            lib.remove_member("M001"),
            Err(LibraryError::UnknownMember(_))
        ));

        lib.register_member(&member("M001")).unwrap();
        lib.remove_member("M001").unwrap();
        assert!(lib.list_members().unwrap().is_empty());
    }

    #[test]
    fn duplicate_member_no_keeps_first_row() {
        let lib = library();
        assert!(lib.register_member(&member("M001")).unwrap());

        let mut second = member("M001");
        second.first_name = "Grace".into();
        assert!(!lib.register_member(&second).unwrap());

        let members = lib.list_members().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].first_name, "Ada");
    }

    #[test]
    fn lending_needs_registered_member() {
        let lib = library();
        lib.add_book(&dune()).unwrap();

        assert!(matches!(
            lib.lend_book("Dune", "M001"),
            Err(LibraryError::UnknownMember(_))
        ));
        assert!(lib.list_loans().unwrap().is_empty());
    }

    #[test]
    fn lending_twice_conflicts() {
        let lib = library();
        lib.add_book(&dune()).unwrap();
        lib.register_member(&member("M001")).unwrap();
        lib.register_member(&member("M002")).unwrap();

        lib.lend_book("Dune", "M001").unwrap();
        assert!(matches!(
            lib.lend_book("Dune", "M002"),
            Err(LibraryError::AlreadyLent(_))
        ));
        assert_eq!(lib.list_loans().unwrap().len(), 1);
    }

    #[test]
    fn returning_clears_the_loan_but_keeps_the_book() {
        let lib = library();
        lib.add_book(&dune()).unwrap();
        lib.register_member(&member("M001")).unwrap();

        assert!(matches!(
            lib.return_book("Dune"),
            Err(LibraryError::NotLent(_))
        ));

        lib.lend_book("Dune", "M001").unwrap();
        lib.return_book("Dune").unwrap();
        assert!(lib.list_loans().unwrap().is_empty());
        assert_eq!(lib.list_books().unwrap().len(), 1);
    }

    #[test]
    fn returning_unknown_title_is_not_found() {
        let lib = library();
        assert!(matches!(
            lib.return_book("Dune"),
            Err(LibraryError::UnknownBook(_))
        ));
    }

    #[test]
    fn lent_books_join_shows_member_names() {
        let lib = library();
        lib.add_book(&dune()).unwrap();
        lib.register_member(&member("M001")).unwrap();
        lib.lend_book("Dune", "M001").unwrap();

        let loans = lib.list_loans().unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].title, "Dune");
        assert_eq!(loans[0].first_name, "Ada");
        assert_eq!(loans[0].last_name, "Lovelace");
    }

    #[test]
    fn removing_a_lent_book_cascades_the_loan() {
        let lib = library();
        lib.add_book(&dune()).unwrap();
        lib.register_member(&member("M001")).unwrap();
        lib.lend_book("Dune", "M001").unwrap();

        lib.remove_book("Dune").unwrap();
        assert!(lib.list_loans().unwrap().is_empty());
    }

    #[test]
    fn duplicate_titles_resolve_to_first_match() {
        let lib = library();
        lib.add_book(&dune()).unwrap();
        let mut reissue = dune();
        reissue.isbn = "9780441013593".into();
        lib.add_book(&reissue).unwrap();

        lib.remove_book("Dune").unwrap();
        let books = lib.list_books().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "9780441013593");
    }

    #[test]
    fn detail_lookups_resolve_business_keys() {
        let lib = library();
        lib.add_book(&dune()).unwrap();
        lib.register_member(&member("M001")).unwrap();

        let book = lib.find_book_by_title("Dune").unwrap().unwrap();
        assert_eq!(book.isbn, "0441013597");
        assert!(lib.find_book_by_title("Hyperion").unwrap().is_none());

        let found = lib.find_member_by_number("M001").unwrap().unwrap();
        assert_eq!(found.full_name(), "Ada Lovelace");
        assert!(lib.find_member_by_number("M999").unwrap().is_none());
    }

    #[test]
    fn import_adds_only_rows_with_new_isbns() {
        use std::io::Write;

        let lib = library();
        lib.add_book(&dune()).unwrap();

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "title,author,publisher,published_year,rating,ISBN\n\
             Dune,Frank Herbert,Ace,1965,4.5,0441013597\n\
             Hyperion,Dan Simmons,Doubleday,1989,4.2,0385249497\n"
        )
        .expect("write csv");

        let summary = lib.import_books_from_csv(file.path()).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(lib.list_books().unwrap().len(), 2);
    }

    #[test]
    fn member_import_routes_through_registration() {
        use std::io::Write;

        let lib = library();
        lib.register_member(&member("M001")).unwrap();

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "first_name,last_name,email,gender,state,member_no\n\
             Ada,Lovelace,ada@example.com,F,CA,M001\n\
             Grace,Hopper,grace@example.com,F,VA,M002\n"
        )
        .expect("write csv");

        let summary = lib.import_members_from_csv(file.path()).unwrap();
        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(lib.list_members().unwrap().len(), 2);
    }

    // The end-to-end scenario from the requirements: add, lend against an
    // unregistered member, register, lend, conflict, return, double return.
    #[test]
    fn dune_lifecycle() {
        let lib = library();
        assert!(lib.add_book(&dune()).unwrap());
        assert_eq!(lib.list_books().unwrap().len(), 1);

        assert!(matches!(
            lib.lend_book("Dune", "M001"),
            Err(LibraryError::UnknownMember(_))
        ));

        lib.register_member(&member("M001")).unwrap();
        lib.lend_book("Dune", "M001").unwrap();

        assert!(matches!(
            lib.lend_book("Dune", "M002"),
            Err(LibraryError::UnknownMember(_))
        ));
        lib.register_member(&member("M002")).unwrap();
        assert!(matches!(
            lib.lend_book("Dune", "M002"),
            Err(LibraryError::AlreadyLent(_))
        ));

        lib.return_book("Dune").unwrap();
        assert!(matches!(
            lib.return_book("Dune"),
            Err(LibraryError::NotLent(_))
        ));
    }
}
