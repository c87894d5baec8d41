//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

/// A catalog entry as stored in the `books` table. The generated `id` stays
/// attached even when the UI only needs display fields because lend/return
/// flows bubble it back to the persistence layer.
#[derive(Debug, Clone)]
pub struct Book {
    /// Primary key from the SQLite store.
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub published_year: i64,
    /// Reader rating on a 1-5 scale. Kept as a float so half-star ratings
    /// from import files survive round-tripping.
    pub rating: f64,
    /// Unique business key. The store refuses a second book with the same
    /// ISBN regardless of how the titles compare.
    pub isbn: String,
}

/// Field set for a book that has not been inserted yet. Manual entry and CSV
/// import both build one of these and hand it to the library service.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub published_year: i64,
    pub rating: f64,
    pub isbn: String,
}

impl fmt::Display for Book {
    /// Write `Title (Author)` to any formatter so the type plays nicely with
    /// Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.author)
    }
}

/// A registered library member as stored in the `members` table.
#[derive(Debug, Clone)]
pub struct Member {
    /// Primary key from the SQLite store.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub state: String,
    /// Unique business key used for all member-facing operations; distinct
    /// from the generated `id`.
    pub member_no: String,
}

/// Field set for a member about to be registered.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub state: String,
    pub member_no: String,
}

impl Member {
    /// Compose a `First Last` display name used by lists and dialogs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Joined read model for the lent-books view: one row per active loan,
/// carrying just what the table displays.
#[derive(Debug, Clone)]
pub struct LentBook {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
}

/// Aggregate outcome of a bulk import. Rows skipped over duplicate business
/// keys are counted but never identified individually.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.added + self.skipped
    }
}
