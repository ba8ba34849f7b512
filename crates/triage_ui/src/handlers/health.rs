//! Backend health and external links.

use iced::Task;

use triage_core::api::HealthStatus;
use triage_core::logging::MessagePrefix;

use super::error_text;
use crate::app::{App, BackendHealth, Message};

impl App {
    pub fn check_health(&mut self) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            self.health = BackendHealth::Unreachable("no HTTP client".to_string());
            return Task::none();
        };

        Task::perform(async move { client.health().await }, |result| {
            Message::HealthChecked(result.map_err(error_text))
        })
    }

    pub fn handle_health_checked(&mut self, result: Result<HealthStatus, String>) {
        self.health = match result {
            Ok(status) if status.is_healthy() => {
                tracing::info!("Backend healthy: {}", status.service);
                BackendHealth::Healthy(status.service)
            }
            Ok(status) => {
                tracing::warn!("Backend reports status {:?}", status.status);
                BackendHealth::Unreachable(format!("status {}", status.status))
            }
            Err(e) => {
                tracing::warn!("Backend health check failed: {}", e);
                self.append_log(&MessagePrefix::Warning.format(&format!(
                    "Backend not reachable: {}",
                    e
                )));
                BackendHealth::Unreachable(e)
            }
        };
    }

    /// Open a link from a rendered response in the system browser.
    ///
    /// The launcher runs detached so `update` never waits on it.
    pub fn open_link(&mut self, url: &str) {
        self.open_link_with(url, |url| open::that_detached(url));
    }

    fn open_link_with(&mut self, url: &str, launch: impl FnOnce(&str) -> std::io::Result<()>) {
        tracing::debug!("Opening {}", url);
        if let Err(e) = launch(url) {
            tracing::warn!("Failed to open {}: {}", url, e);
            self.append_log(&MessagePrefix::Error.format(&format!("Cannot open {}: {}", url, e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use triage_core::api::HealthStatus;
    use triage_core::config::Settings;

    use crate::app::{App, AppInit, BackendHealth};

    fn app() -> App {
        let mut settings = Settings::default();
        settings.ui.load_samples_on_start = false;
        App::new(AppInit {
            config_path: std::env::temp_dir().join("triage-desk-test.toml"),
            settings,
            version_info: String::new(),
        })
        .0
    }

    #[test]
    fn launcher_failure_is_logged() {
        let mut app = app();
        app.open_link_with("https://docs.example.com", |_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "no launcher"))
        });
        assert!(app
            .log_text
            .contains("Cannot open https://docs.example.com: no launcher"));
    }

    #[test]
    fn health_result_sets_status() {
        let mut app = app();
        app.handle_health_checked(Ok(HealthStatus {
            status: "healthy".into(),
            service: "triage-api".into(),
        }));
        assert_eq!(app.health, BackendHealth::Healthy("triage-api".into()));

        app.handle_health_checked(Err("Request failed: connection refused".into()));
        assert_eq!(
            app.health,
            BackendHealth::Unreachable("Request failed: connection refused".into())
        );
    }
}
