//! Core library surface for the Daisy Library Management TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the SQLite-backed catalog store, the library service that fronts
//! it, and the interactive terminal interface.
pub mod db;
pub mod import;
pub mod library;
pub mod logging;
pub mod models;
pub mod ui;

/// The service facade and its error taxonomy; everything the UI calls.
pub use library::{Library, LibraryError};

/// The domain types that cross layer boundaries.
pub use models::{Book, ImportSummary, LentBook, Member, NewBook, NewMember};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
