//! Binary entry point that glues the SQLite-backed library service to the
//! TUI: bring up logging and the database, hydrate the service, and drive the
//! Ratatui event loop until the user exits.
use daisy_library::{logging, run_app, App, Library};

/// Initialize persistence and launch the event loop. Returning a `Result`
/// bubbles up fatal initialization problems (for example an unwritable data
/// directory) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init()?;

    let library = Library::open_default()?;
    let mut app = App::new(library);
    run_app(&mut app)
}
