//! Persistence module split across logical submodules. Every function takes
//! an explicit `&Connection`; the library service owns the handle and decides
//! what the queries mean.

mod books;
mod connection;
mod loans;
mod members;

pub use books::{delete_book, find_book_by_isbn, find_book_by_title, insert_book, list_books};
pub use connection::{apply_schema, data_dir, ensure_schema};
pub use loans::{delete_loan, find_loan_for_book, insert_loan, list_lent_books};
pub use members::{
    delete_member, find_member_by_number, insert_member, list_members,
};
