//! Config manager for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only modified section is changed)
//! - Validation on load (unknown tables trigger a rewrite)
//! - Environment override for the backend URL

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{default_base_url, ConfigSection, Settings};

/// Environment variable that overrides `api.base_url` for one run.
pub const API_URL_ENV: &str = "TRIAGE_API_URL";

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default config location: the platform config dir, or `.config/settings.toml`
/// relative to the working directory when no home directory is known.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("io.github", "triage-desk", "triage-desk")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
        .unwrap_or_else(|| PathBuf::from(".config").join("settings.toml"))
}

/// Manages application configuration.
///
/// Handles loading, saving, and atomic section-level updates.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    ///
    /// Changes made here are only in memory until `save()` or
    /// `update_section()` is called.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        self.normalize();
        Ok(())
    }

    /// Load config from file, creating with defaults if it doesn't exist.
    ///
    /// Also validates and cleans up the config, saving if changes were made.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = self.parse_validate_and_clean(&content)?;
            self.settings = settings;
            self.normalize();

            if was_modified {
                tracing::debug!("Rewriting config {} with defaults", self.config_path.display());
                self.save()?;
            }
        } else {
            if let Some(parent) = self.config_path.parent() {
                fs::create_dir_all(parent)?;
            }

            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Apply `TRIAGE_API_URL` on top of the loaded settings.
    ///
    /// The override lives in memory only and is never written back.
    pub fn apply_env_overrides(&mut self) {
        self.apply_api_url_override(std::env::var(API_URL_ENV).ok());
    }

    fn apply_api_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()) {
            if !url.is_empty() {
                tracing::info!("Using backend URL from {}: {}", API_URL_ENV, url);
                self.settings.api.base_url = url;
            }
        }
    }

    /// Get the logs folder path.
    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.logging.logs_folder)
    }

    fn normalize(&mut self) {
        if self.settings.api.base_url.trim().is_empty() {
            self.settings.api.base_url = default_base_url();
        }
    }

    /// Parse, validate, and clean up config content.
    ///
    /// Returns the settings and whether any modifications were made.
    fn parse_validate_and_clean(&self, content: &str) -> ConfigResult<(Settings, bool)> {
        let doc: DocumentMut = content.parse()?;
        let settings: Settings = toml::from_str(content)?;

        let valid_sections = ["api", "logging", "ui"];
        let has_unknown = doc.iter().any(|(key, _)| !valid_sections.contains(&key));

        // Any key serde filled from defaults is absent from the document
        let full: DocumentMut = toml::to_string_pretty(&settings)?.parse()?;
        let missing_defaults = full.iter().any(|(section, item)| {
            let Some(expected) = item.as_table() else {
                return false;
            };
            match doc.get(section).and_then(Item::as_table) {
                Some(present) => expected.iter().any(|(key, _)| !present.contains_key(key)),
                None => true,
            }
        });

        Ok((settings, has_unknown || missing_defaults))
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Update a specific section atomically.
    ///
    /// Re-reads the file from disk, replaces only the specified table, and
    /// writes back atomically. Comments in other sections survive.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_toml = match section {
            ConfigSection::Api => toml::to_string_pretty(&self.settings.api)?,
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
            ConfigSection::Ui => toml::to_string_pretty(&self.settings.ui)?,
        };

        let section_doc: DocumentMut = section_toml.parse()?;
        let section_table = section_doc.as_table().clone();

        doc[section.table_name()] = Item::Table(section_table);

        self.atomic_write(&doc.to_string())?;

        Ok(())
    }

    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# Triage Desk Configuration\n");
        output.push_str(
            "# This file is auto-generated. Comments may be preserved on section updates.\n\n",
        );

        let sections: [(&str, &str, String); 3] = [
            (
                "# Triage backend connection\n",
                "api",
                toml::to_string_pretty(&self.settings.api)?,
            ),
            (
                "# Logging configuration (RUST_LOG takes precedence)\n",
                "logging",
                toml::to_string_pretty(&self.settings.logging)?,
            ),
            (
                "# Dashboard behaviour\n",
                "ui",
                toml::to_string_pretty(&self.settings.ui)?,
            ),
        ];

        for (comment, table, body) in sections {
            output.push_str(comment);
            output.push('[');
            output.push_str(table);
            output.push_str("]\n");
            for line in body.lines() {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        Ok(output)
    }

    /// Write content to config file atomically.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[api]"));
        assert!(content.contains("[logging]"));
        assert!(content.contains("[ui]"));
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        fs::write(
            &config_path,
            "[api]\nbase_url = \"http://support-backend:9000\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().api.base_url, "http://support-backend:9000");
        // Missing sections were filled in and written back
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[ui]"));
    }

    #[test]
    fn blank_base_url_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        fs::write(&config_path, "[api]\nbase_url = \"  \"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load().unwrap();

        assert_eq!(manager.settings().api.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn update_section_only_changes_target() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        manager.settings_mut().ui.last_upload_dir = "/data/tickets".to_string();
        manager.settings_mut().api.base_url = "http://not-saved".to_string();
        manager.update_section(ConfigSection::Ui).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("last_upload_dir = \"/data/tickets\""));
        assert!(!content.contains("http://not-saved"));
        assert!(content.contains("# Triage backend connection"));
    }

    #[test]
    fn env_override_replaces_base_url_in_memory() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        manager.apply_api_url_override(Some(" http://override:7000 ".to_string()));

        assert_eq!(manager.settings().api.base_url, "http://override:7000");
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(!content.contains("override"));

        manager.apply_api_url_override(Some(String::new()));
        assert_eq!(manager.settings().api.base_url, "http://override:7000");
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let temp_path = config_path.with_extension("toml.tmp");
        assert!(!temp_path.exists());
    }
}
