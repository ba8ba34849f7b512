//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Dashboard behaviour.
    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the triage backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the triage backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout for non-streaming calls, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

pub(crate) fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Application-level logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Folder for rolling log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Also write logs to a daily file in `logs_folder`.
    #[serde(default = "default_true")]
    pub file_logging: bool,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            logs_folder: default_logs_folder(),
            file_logging: true,
        }
    }
}

/// Dashboard behaviour toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Load the backend's default ticket set when the window opens.
    #[serde(default = "default_true")]
    pub load_samples_on_start: bool,

    /// Classify uploaded files over the event stream instead of one request.
    #[serde(default = "default_true")]
    pub stream_uploads: bool,

    /// Directory of the last uploaded ticket file.
    #[serde(default)]
    pub last_upload_dir: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            load_samples_on_start: true,
            stream_uploads: true,
            last_upload_dir: String::new(),
        }
    }
}

/// Config sections that can be written independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Api,
    Logging,
    Ui,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Api => "api",
            ConfigSection::Logging => "logging",
            ConfigSection::Ui => "ui",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("[ui]"));
        assert!(toml.contains("base_url"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[api]\nbase_url = \"http://triage.internal:8080\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.api.base_url, "http://triage.internal:8080");
        assert_eq!(parsed.api.request_timeout_secs, 120);
        assert!(parsed.ui.stream_uploads);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn log_level_reads_lowercase() {
        let parsed: Settings = toml::from_str("[logging]\nlevel = \"debug\"").unwrap();
        assert_eq!(parsed.logging.level, LogLevel::Debug);
    }
}
