//! Ticket file picking and the upload flow.

use std::path::{Path, PathBuf};

use anyhow::Context;
use iced::Task;

use triage_core::config::ConfigSection;
use triage_core::logging::MessagePrefix;
use triage_core::models::TicketInput;
use triage_core::tickets::load_ticket_file;

use super::error_text;
use crate::app::{App, Message};

impl App {
    /// Open a native picker for a JSON ticket file.
    pub fn browse_ticket_file(&self) -> Task<Message> {
        if !self.can_upload() {
            return Task::none();
        }

        let start_dir = Some(self.config.settings().ui.last_upload_dir.clone())
            .filter(|dir| !dir.is_empty() && Path::new(dir).is_dir());

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new()
                    .set_title("Upload tickets")
                    .add_filter("JSON Files", &["json"])
                    .add_filter("All Files", &["*"]);
                if let Some(dir) = start_dir {
                    dialog = dialog.set_directory(dir);
                }
                dialog.pick_file().await.map(|f| f.path().to_path_buf())
            },
            Message::UploadFileSelected,
        )
    }

    /// Handle file selected from the picker.
    pub fn handle_upload_file_selected(&mut self, path: Option<PathBuf>) -> Task<Message> {
        let Some(path) = path else {
            return Task::none();
        };

        self.append_log(&format!("Upload: {}", path.display()));
        self.remember_upload_dir(&path);
        self.load_error = None;

        Task::perform(
            async move {
                load_ticket_file(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))
            },
            |result| Message::UploadFileParsed(result.map_err(error_text)),
        )
    }

    /// Handle parsed upload: classify it, streamed or in one request.
    pub fn handle_upload_file_parsed(
        &mut self,
        result: Result<Vec<TicketInput>, String>,
    ) -> Task<Message> {
        match result {
            Ok(tickets) => {
                self.append_log(&format!("Parsed {} tickets", tickets.len()));
                if self.config.settings().ui.stream_uploads {
                    self.start_streaming(tickets)
                } else {
                    self.classify_uploaded(tickets)
                }
            }
            Err(e) => {
                tracing::warn!("Ticket file rejected: {}", e);
                self.append_log(&MessagePrefix::Error.format(&e));
                self.load_error = Some(e);
                Task::none()
            }
        }
    }

    fn remember_upload_dir(&mut self, path: &Path) {
        let Some(dir) = path.parent() else {
            return;
        };
        let dir = dir.to_string_lossy().to_string();
        if self.config.settings().ui.last_upload_dir == dir {
            return;
        }

        self.config.settings_mut().ui.last_upload_dir = dir;
        if let Err(e) = self.config.update_section(ConfigSection::Ui) {
            tracing::warn!("Failed to save upload folder: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;
    use triage_core::config::Settings;
    use triage_core::models::TicketInput;

    use crate::app::{App, AppInit};

    fn app_with(config_path: std::path::PathBuf, stream_uploads: bool) -> App {
        let mut settings = Settings::default();
        settings.ui.load_samples_on_start = false;
        settings.ui.stream_uploads = stream_uploads;
        App::new(AppInit {
            config_path,
            settings,
            version_info: String::new(),
        })
        .0
    }

    fn tickets() -> Vec<TicketInput> {
        serde_json::from_value(json!([
            { "id": "1", "subject": "SSO loop", "body": "Okta keeps redirecting" }
        ]))
        .unwrap()
    }

    #[test]
    fn upload_streams_by_default() {
        let dir = tempdir().unwrap();
        let mut app = app_with(dir.path().join("settings.toml"), true);

        let _ = app.handle_upload_file_parsed(Ok(tickets()));

        assert!(app.is_streaming);
        assert!(!app.is_loading);
        assert!(!app.can_upload());
    }

    #[test]
    fn upload_without_streaming_uses_single_request() {
        let dir = tempdir().unwrap();
        let mut app = app_with(dir.path().join("settings.toml"), false);

        let _ = app.handle_upload_file_parsed(Ok(tickets()));

        assert!(app.is_loading);
        assert!(!app.is_streaming);
        assert!(app.log_text.contains("POST /bulk_classify\n"));
    }

    #[test]
    fn parse_error_is_shown() {
        let dir = tempdir().unwrap();
        let mut app = app_with(dir.path().join("settings.toml"), true);

        let _ = app.handle_upload_file_parsed(Err("Failed to read t.json: expected value".into()));

        assert!(!app.is_streaming);
        assert_eq!(
            app.load_error.as_deref(),
            Some("Failed to read t.json: expected value")
        );
    }

    #[test]
    fn picked_folder_is_saved_to_ui_section() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        let upload_dir = dir.path().join("exports");
        let mut app = app_with(config_path.clone(), true);

        let _ = app.handle_upload_file_selected(Some(upload_dir.join("tickets.json")));

        let expected = upload_dir.to_string_lossy().to_string();
        assert_eq!(app.config.settings().ui.last_upload_dir, expected);
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[ui]"));
        assert!(content.contains(&format!("last_upload_dir = {:?}", expected)));
    }

    #[test]
    fn cancelled_picker_changes_nothing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");
        let mut app = app_with(config_path.clone(), true);

        let _ = app.handle_upload_file_selected(None);

        assert!(!config_path.exists());
        assert!(app.load_error.is_none());
    }
}
