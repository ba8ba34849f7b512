//! Triage Desk - Main entry point
//!
//! Loads configuration, initializes logging and launches the iced
//! application.

use triage_core::config::{default_config_path, ConfigManager};
use triage_core::logging::{init_tracing, init_tracing_with_file};

mod app;
mod handlers;
mod pages;
mod theme;
mod widgets;

use app::{App, AppInit};

fn main() -> iced::Result {
    // Load configuration first (needed for logs directory path)
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let logging = config_manager.settings().logging.clone();
    let logs_dir = config_manager.logs_folder();
    let _log_guard = if logging.file_logging {
        init_tracing_with_file(logging.level, &logs_dir)
    } else {
        init_tracing(logging.level);
        None
    };

    config_manager.apply_env_overrides();

    tracing::info!("Triage Desk starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", triage_core::version());
    tracing::info!("Backend: {}", config_manager.settings().api.base_url);

    let init = AppInit {
        config_path: config_path.clone(),
        settings: config_manager.settings().clone(),
        version_info: format!(
            "Triage Desk started.\nCore version: {}\nConfig: {}\nBackend: {}",
            triage_core::version(),
            config_path.display(),
            config_manager.settings().api.base_url,
        ),
    };

    iced::application(move || App::new(init.clone()), App::update, App::view)
        .title("Triage Desk")
        .window_size((1280.0, 860.0))
        .run()
}
