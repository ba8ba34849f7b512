//! Message handlers for the App struct.
//!
//! Each module adds an `impl App` block for one area of the window. Handlers
//! start async work as `Task`s and fold results back into state.

mod agent;
mod browse;
mod health;
mod reports;
mod tickets;

/// Render an error for display, keeping `anyhow` context chains readable.
pub(crate) fn error_text(err: impl std::fmt::Display) -> String {
    format!("{:#}", err)
}
