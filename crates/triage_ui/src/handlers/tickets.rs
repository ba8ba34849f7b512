//! Loading and classifying ticket sets for the dashboard.

use futures_util::stream::{self, StreamExt};
use iced::Task;

use triage_core::api::StreamEvent;
use triage_core::logging::MessagePrefix;
use triage_core::models::{Ticket, TicketInput};

use super::error_text;
use crate::app::{App, Message, StreamProgress};

impl App {
    /// Ask the backend for its default ticket set.
    pub fn load_default_tickets(&mut self) -> Task<Message> {
        self.request_bulk_classify(None)
    }

    /// Classify an uploaded set in a single request.
    pub fn classify_uploaded(&mut self, tickets: Vec<TicketInput>) -> Task<Message> {
        self.request_bulk_classify(Some(tickets))
    }

    fn request_bulk_classify(&mut self, tickets: Option<Vec<TicketInput>>) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        self.is_loading = true;
        self.load_error = None;
        self.append_log(&MessagePrefix::Request.format("POST /bulk_classify"));

        Task::perform(
            async move { client.bulk_classify(tickets.as_deref()).await },
            |result| Message::TicketsLoaded(result.map_err(error_text)),
        )
    }

    /// Handle the result of a non-streaming bulk classification.
    pub fn handle_tickets_loaded(&mut self, result: Result<Vec<Ticket>, String>) {
        self.is_loading = false;
        match result {
            Ok(tickets) => {
                self.append_log(&MessagePrefix::Success.format(&format!(
                    "Classified {} tickets",
                    tickets.len()
                )));
                self.tickets = tickets;
                self.load_generation += 1;
                self.ticket_responses.clear();
            }
            Err(e) => {
                tracing::error!("Failed to load tickets: {}", e);
                let message = format!("Failed to load tickets: {}", e);
                self.append_log(&MessagePrefix::Error.format(&message));
                self.load_error = Some(message);
            }
        }
    }

    /// Start streaming classification; rows arrive as `StreamEvent`s.
    pub fn start_streaming(&mut self, tickets: Vec<TicketInput>) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        tracing::info!("Streaming classification of {} tickets", tickets.len());
        self.is_streaming = true;
        self.load_error = None;
        self.tickets.clear();
        self.load_generation += 1;
        self.ticket_responses.clear();
        self.progress = StreamProgress::default();
        self.append_log(&MessagePrefix::Request.format("POST /bulk_classify_stream"));

        let events = stream::once(async move { client.bulk_classify_stream(&tickets).await })
            .flat_map(|opened| match opened {
                Ok(events) => events.map(|event| event.map_err(error_text)).left_stream(),
                Err(e) => stream::once(async move { Err(error_text(e)) }).right_stream(),
            });

        Task::run(events, Message::StreamEvent).chain(Task::done(Message::StreamFinished))
    }

    /// Fold one stream event into the table and progress bar.
    pub fn handle_stream_event(&mut self, event: Result<StreamEvent, String>) {
        if !self.is_streaming {
            return;
        }

        match event {
            Ok(StreamEvent::Start { total }) => {
                self.progress = StreamProgress { current: 0, total };
                self.append_log(&format!("Classifying {} tickets...", total));
            }
            Ok(StreamEvent::Ticket { data }) => {
                self.tickets.push(Ticket::from_bulk_result(data));
                self.progress.current += 1;
            }
            Ok(StreamEvent::Error { data }) => {
                tracing::warn!("Backend failed on a ticket: {}", data);
                self.progress.current += 1;
            }
            Ok(StreamEvent::Complete) => {
                self.is_streaming = false;
                self.append_log(&MessagePrefix::Success.format(&format!(
                    "Streaming complete: {} of {} tickets classified",
                    self.tickets.len(),
                    self.progress.total
                )));
            }
            Ok(StreamEvent::Unknown) => {}
            Err(e) => {
                tracing::error!("Streaming failed: {}", e);
                let message = format!("Streaming failed: {}", e);
                self.append_log(&MessagePrefix::Error.format(&message));
                self.load_error = Some(message);
                self.is_streaming = false;
            }
        }
    }

    /// The event stream ended; make sure the dashboard is idle again.
    pub fn handle_stream_finished(&mut self) {
        if self.is_streaming {
            tracing::warn!("Stream ended without a completion event");
            self.append_log(&MessagePrefix::Warning.format("Stream ended early"));
            self.is_streaming = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppInit;
    use serde_json::json;
    use triage_core::config::Settings;
    use triage_core::models::BulkResult;

    fn app() -> App {
        let mut settings = Settings::default();
        settings.ui.load_samples_on_start = false;
        let (app, _) = App::new(AppInit {
            config_path: std::env::temp_dir().join("triage-desk-test.toml"),
            settings,
            version_info: String::new(),
        });
        app
    }

    fn ticket_event(id: &str, priority: &str) -> StreamEvent {
        let data: BulkResult = serde_json::from_value(json!({
            "id": id,
            "classification": { "priority": priority, "original_question": "Subject\nBody" }
        }))
        .unwrap();
        StreamEvent::Ticket { data }
    }

    #[test]
    fn stream_events_fill_table_and_progress() {
        let mut app = app();
        app.is_streaming = true;

        app.handle_stream_event(Ok(StreamEvent::Start { total: 3 }));
        app.handle_stream_event(Ok(ticket_event("1", "P0")));
        app.handle_stream_event(Ok(StreamEvent::Error { data: json!({"id": "2"}) }));
        app.handle_stream_event(Ok(StreamEvent::Unknown));
        app.handle_stream_event(Ok(ticket_event("3", "P2")));

        assert_eq!(app.progress, StreamProgress { current: 3, total: 3 });
        assert_eq!(app.tickets.len(), 2);
        assert_eq!(app.stats().high_priority, 1);
        assert!(app.is_streaming);

        app.handle_stream_event(Ok(StreamEvent::Complete));
        assert!(!app.is_streaming);

        // Late events after completion are ignored
        app.handle_stream_event(Ok(ticket_event("4", "P1")));
        assert_eq!(app.tickets.len(), 2);
    }

    #[test]
    fn stream_error_surfaces_and_returns_to_idle() {
        let mut app = app();
        app.is_streaming = true;

        app.handle_stream_event(Err("HTTP 500: boom".into()));

        assert!(!app.is_streaming);
        assert_eq!(app.load_error.as_deref(), Some("Streaming failed: HTTP 500: boom"));
    }

    #[test]
    fn finished_without_complete_goes_idle() {
        let mut app = app();
        app.is_streaming = true;
        app.handle_stream_finished();
        assert!(!app.is_streaming);
        assert!(app.log_text.contains("Stream ended early"));
    }

    #[test]
    fn load_failure_is_reported() {
        let mut app = app();
        app.is_loading = true;
        app.handle_tickets_loaded(Err("Request failed: connection refused".into()));
        assert!(!app.is_loading);
        assert_eq!(
            app.load_error.as_deref(),
            Some("Failed to load tickets: Request failed: connection refused")
        );
    }
}
