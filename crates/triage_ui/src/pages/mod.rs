//! Page views. Each `view` borrows the app state and builds widgets.

pub mod agent;
pub mod dashboard;
pub mod log;
pub mod reports;
pub mod sidebar;
