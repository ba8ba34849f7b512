//! Triage Core - backend client and data model for Triage Desk
//!
//! This crate contains all non-UI logic: the HTTP client and event-stream
//! consumer for the triage backend, the ticket and report models, response
//! rendering, configuration and logging setup.

pub mod api;
pub mod config;
pub mod logging;
pub mod models;
pub mod render;
pub mod tickets;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
