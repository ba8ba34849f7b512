//! Main application state and message routing.

use std::collections::HashMap;
use std::path::PathBuf;

use iced::widget::{column, container, image, row, text_editor};
use iced::{Element, Length, Task};

use triage_core::api::{ApiClient, HealthStatus, StreamEvent};
use triage_core::config::{ConfigManager, Settings};
use triage_core::logging::MessagePrefix;
use triage_core::models::{
    Analysis, ChartSpec, ClassificationStats, ReportsResponse, Ticket, TicketId, TicketInput,
};
use triage_core::render::{render_response, RenderedLine};

use crate::pages;
use crate::theme;

/// Lines kept in the activity log panel.
const MAX_LOG_LINES: usize = 500;

/// Top-level screens reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Agent,
    Reports,
}

impl View {
    pub const ALL: [View; 3] = [View::Dashboard, View::Agent, View::Reports];

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Bulk Classification",
            View::Agent => "Interactive Agent",
            View::Reports => "Analytics & Reports",
        }
    }
}

/// Streamed classification progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamProgress {
    pub current: usize,
    pub total: usize,
}

/// Backend health as last observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Healthy(String),
    Unreachable(String),
}

/// Everything the UI can react to.
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(View),

    // Dashboard
    TicketsLoaded(Result<Vec<Ticket>, String>),
    UploadTickets,
    UploadFileSelected(Option<PathBuf>),
    UploadFileParsed(Result<Vec<TicketInput>, String>),
    StreamEvent(Result<StreamEvent, String>),
    StreamFinished,
    QuickTextChanged(String),
    QuickClassify,
    GenerateResponse(TicketId),
    /// Row response for the ticket set loaded in the given generation.
    TicketResponseReady(u64, TicketId, Result<(Analysis, String), String>),

    // Interactive agent
    EditorAction(text_editor::Action),
    AnalyzeTicket,
    AnalysisReady(Result<(Analysis, String), String>),

    // Reports
    GenerateReports,
    ReportsReady(Result<ReportsResponse, String>),

    // Misc
    CheckHealth,
    HealthChecked(Result<HealthStatus, String>),
    OpenLink(String),
}

/// Startup inputs handed over from `main`.
#[derive(Debug, Clone)]
pub struct AppInit {
    pub config_path: PathBuf,
    pub settings: Settings,
    pub version_info: String,
}

/// Main application state.
pub struct App {
    pub config: ConfigManager,
    pub client: Option<ApiClient>,
    pub view: View,

    // Dashboard
    pub tickets: Vec<Ticket>,
    /// Bumped whenever the table is reloaded; stale row responses are dropped.
    pub load_generation: u64,
    pub is_loading: bool,
    pub is_streaming: bool,
    pub progress: StreamProgress,
    pub load_error: Option<String>,
    pub quick_text: String,
    pub ticket_responses: HashMap<TicketId, Vec<RenderedLine>>,
    pub generating_for: Option<TicketId>,

    // Interactive agent
    pub editor: text_editor::Content,
    pub is_analyzing: bool,
    pub current_analysis: Option<Analysis>,
    pub current_response: Vec<RenderedLine>,
    pub agent_error: Option<String>,

    // Reports
    pub reports: Option<ReportsResponse>,
    /// Charts decoded once per report; `None` marks one that failed to decode.
    pub report_charts: Vec<(ChartSpec, Option<image::Handle>)>,
    pub is_generating_reports: bool,
    pub reports_error: Option<String>,

    pub health: BackendHealth,
    pub log_text: String,
}

impl App {
    /// Build the initial state and kick off startup requests.
    pub fn new(init: AppInit) -> (Self, Task<Message>) {
        let mut config = ConfigManager::new(&init.config_path);
        *config.settings_mut() = init.settings;

        let mut log_text = String::new();
        let client = match ApiClient::from_settings(&config.settings().api) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!("Cannot build HTTP client: {}", e);
                log_text.push_str(&MessagePrefix::Error.format(&format!("HTTP client: {}", e)));
                log_text.push('\n');
                None
            }
        };

        let mut app = Self {
            config,
            client,
            view: View::default(),
            tickets: Vec::new(),
            load_generation: 0,
            is_loading: false,
            is_streaming: false,
            progress: StreamProgress::default(),
            load_error: None,
            quick_text: String::new(),
            ticket_responses: HashMap::new(),
            generating_for: None,
            editor: text_editor::Content::new(),
            is_analyzing: false,
            current_analysis: None,
            current_response: Vec::new(),
            agent_error: None,
            reports: None,
            report_charts: Vec::new(),
            is_generating_reports: false,
            reports_error: None,
            health: BackendHealth::Unknown,
            log_text,
        };

        for line in init.version_info.lines() {
            app.append_log(line);
        }

        let mut startup = vec![Task::done(Message::CheckHealth)];
        if app.config.settings().ui.load_samples_on_start {
            startup.push(app.load_default_tickets());
        }

        (app, Task::batch(startup))
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(view) => {
                self.view = view;
                Task::none()
            }

            Message::TicketsLoaded(result) => {
                self.handle_tickets_loaded(result);
                Task::none()
            }
            Message::UploadTickets => self.browse_ticket_file(),
            Message::UploadFileSelected(path) => self.handle_upload_file_selected(path),
            Message::UploadFileParsed(result) => self.handle_upload_file_parsed(result),
            Message::StreamEvent(event) => {
                self.handle_stream_event(event);
                Task::none()
            }
            Message::StreamFinished => {
                self.handle_stream_finished();
                Task::none()
            }
            Message::QuickTextChanged(value) => {
                self.quick_text = value;
                Task::none()
            }
            Message::QuickClassify => self.quick_classify(),
            Message::GenerateResponse(id) => self.generate_response_for(id),
            Message::TicketResponseReady(generation, id, result) => {
                self.handle_ticket_response(generation, id, result);
                Task::none()
            }

            Message::EditorAction(action) => {
                self.editor.perform(action);
                Task::none()
            }
            Message::AnalyzeTicket => self.analyze_editor_text(),
            Message::AnalysisReady(result) => {
                self.handle_analysis_ready(result);
                Task::none()
            }

            Message::GenerateReports => self.generate_reports(),
            Message::ReportsReady(result) => {
                self.handle_reports_ready(result);
                Task::none()
            }

            Message::CheckHealth => self.check_health(),
            Message::HealthChecked(result) => {
                self.handle_health_checked(result);
                Task::none()
            }
            Message::OpenLink(url) => {
                self.open_link(&url);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let page = match self.view {
            View::Dashboard => pages::dashboard::view(self),
            View::Agent => pages::agent::view(self),
            View::Reports => pages::reports::view(self),
        };

        let main = column![
            container(page).height(Length::FillPortion(3)),
            pages::log::view(self),
        ]
        .spacing(theme::spacing::SM);

        row![
            pages::sidebar::view(self),
            container(main)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(theme::spacing::XL)
                .style(theme::content),
        ]
        .into()
    }

    /// Append a timestamped line to the activity log.
    pub fn append_log(&mut self, message: &str) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.log_text.push_str(&format!("[{}] {}\n", stamp, message));

        let excess = self.log_text.lines().count().saturating_sub(MAX_LOG_LINES);
        if excess > 0 {
            if let Some((cut, _)) = self.log_text.match_indices('\n').nth(excess - 1) {
                self.log_text.drain(..=cut);
            }
        }
    }

    pub fn stats(&self) -> ClassificationStats {
        ClassificationStats::from_tickets(&self.tickets)
    }

    /// Responses already generated for a row, if any.
    pub fn response_for(&self, id: &TicketId) -> Option<&[RenderedLine]> {
        self.ticket_responses.get(id).map(Vec::as_slice)
    }

    pub(crate) fn set_current_response(&mut self, analysis: Analysis, answer: &str) {
        self.current_analysis = Some(analysis);
        self.current_response = render_response(answer);
    }

    /// Busy with any request that shares the analysis slot.
    pub fn is_busy(&self) -> bool {
        self.is_analyzing || self.generating_for.is_some()
    }

    /// Whether a new ticket set may replace the table.
    pub fn can_upload(&self) -> bool {
        !self.is_streaming && !self.is_loading && self.generating_for.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_keeps_recent_lines() {
        let mut settings = Settings::default();
        settings.ui.load_samples_on_start = false;
        let (mut app, _) = App::new(AppInit {
            config_path: std::env::temp_dir().join("triage-desk-test.toml"),
            settings,
            version_info: String::new(),
        });

        for i in 0..(MAX_LOG_LINES + 25) {
            app.append_log(&format!("line {}", i));
        }

        assert_eq!(app.log_text.lines().count(), MAX_LOG_LINES);
        assert!(app.log_text.lines().next().is_some_and(|l| l.ends_with("line 25")));
        assert!(app.log_text.ends_with(&format!("line {}\n", MAX_LOG_LINES + 24)));
    }
}
