//! Bulk import of books and members from delimited files with a header row.
//! This module only parses; routing each parsed row through the validated
//! create path is the library service's job, so a duplicate row in a file is
//! subject to exactly the same skip rule as manual entry.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

use crate::models::{NewBook, NewMember};

/// Column headers a book file must carry. The ISBN header is upper-case;
/// every file in circulation spells it that way, so we match it exactly.
const BOOK_COLUMNS: [&str; 6] = [
    "title",
    "author",
    "publisher",
    "published_year",
    "rating",
    "ISBN",
];

/// Column headers a member file must carry.
const MEMBER_COLUMNS: [&str; 6] = [
    "first_name",
    "last_name",
    "email",
    "gender",
    "state",
    "member_no",
];

/// Parse a book CSV into drafts, in file order. A missing column or an
/// unparseable numeric field aborts with an error naming the offending row.
pub fn read_books(path: &Path) -> Result<Vec<NewBook>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let indexes = column_indexes(reader.headers().context("failed to read header row")?, &BOOK_COLUMNS)?;

    let mut books = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {}", row_no + 2))?;
        let field = |idx: usize| field_at(&record, indexes[idx], row_no);

        let published_year = field(3)?
            .parse::<i64>()
            .with_context(|| format!("row {}: published_year is not a number", row_no + 2))?;
        let rating = field(4)?
            .parse::<f64>()
            .with_context(|| format!("row {}: rating is not a number", row_no + 2))?;

        books.push(NewBook {
            title: field(0)?.to_string(),
            author: field(1)?.to_string(),
            publisher: field(2)?.to_string(),
            published_year,
            rating,
            isbn: field(5)?.to_string(),
        });
    }
    Ok(books)
}

/// Parse a member CSV into drafts, in file order.
pub fn read_members(path: &Path) -> Result<Vec<NewMember>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let indexes =
        column_indexes(reader.headers().context("failed to read header row")?, &MEMBER_COLUMNS)?;

    let mut members = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read row {}", row_no + 2))?;
        let field = |idx: usize| field_at(&record, indexes[idx], row_no);

        members.push(NewMember {
            first_name: field(0)?.to_string(),
            last_name: field(1)?.to_string(),
            email: field(2)?.to_string(),
            gender: field(3)?.to_string(),
            state: field(4)?.to_string(),
            member_no: field(5)?.to_string(),
        });
    }
    Ok(members)
}

/// Map required column names to their positions in the header row, so files
/// may carry the columns in any order (and extra columns are ignored).
fn column_indexes(headers: &StringRecord, required: &[&str]) -> Result<Vec<usize>> {
    required
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|header| header == *name)
                .ok_or_else(|| anyhow!("missing required column '{name}'"))
        })
        .collect()
}

fn field_at<'r>(record: &'r StringRecord, index: usize, row_no: usize) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| anyhow!("row {} is missing a value", row_no + 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn reads_books_with_reordered_columns() {
        let file = csv_file(
            "ISBN,title,author,publisher,published_year,rating\n\
             0441013597,Dune,Frank Herbert,Ace,1965,4.5\n",
        );

        let books = read_books(file.path()).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "0441013597");
        assert_eq!(books[0].published_year, 1965);
        assert_eq!(books[0].rating, 4.5);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = csv_file("title,author,publisher,published_year,rating\n");
        let err = read_books(file.path()).unwrap_err();
        assert!(err.to_string().contains("ISBN"));
    }

    #[test]
    fn non_numeric_year_names_the_row() {
        let file = csv_file(
            "title,author,publisher,published_year,rating,ISBN\n\
             Dune,Frank Herbert,Ace,nineteen65,4.5,0441013597\n",
        );
        let err = read_books(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("published_year"));
    }

    #[test]
    fn reads_members() {
        let file = csv_file(
            "first_name,last_name,email,gender,state,member_no\n\
             Ada,Lovelace,ada@example.com,F,CA,M001\n\
             Grace,Hopper,grace@example.com,F,VA,M002\n",
        );

        let members = read_members(file.path()).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].member_no, "M002");
    }
}
