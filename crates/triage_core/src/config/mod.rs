//! Configuration for Triage Desk.
//!
//! Settings live in a TOML file with one table per concern. The manager
//! writes atomically and can replace a single table without touching others.

mod manager;
mod settings;

pub use manager::{default_config_path, ConfigError, ConfigManager, ConfigResult, API_URL_ENV};
pub use settings::{ApiSettings, ConfigSection, LoggingSettings, Settings, UiSettings};
