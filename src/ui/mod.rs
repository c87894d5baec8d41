//! Terminal user interface split across logical submodules: `app` owns state
//! and key handling, `forms` the modal input state machines, `screens` the
//! scrollable table views, and `terminal` the raw-mode event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
