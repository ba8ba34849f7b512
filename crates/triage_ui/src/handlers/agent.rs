//! Single-ticket analysis: quick classify, the agent editor, and per-row responses.

use iced::Task;

use triage_core::logging::MessagePrefix;
use triage_core::models::{Analysis, TicketId};
use triage_core::render::render_response;

use super::error_text;
use crate::app::{App, Message, View};

impl App {
    /// Submit the dashboard's quick-classify input.
    pub fn quick_classify(&mut self) -> Task<Message> {
        let text = self.quick_text.trim().to_string();
        let task = self.start_analysis(text);
        if self.is_analyzing {
            self.view = View::Agent;
        }
        task
    }

    /// Submit the agent editor's text.
    pub fn analyze_editor_text(&mut self) -> Task<Message> {
        let text = self.editor.text().trim().to_string();
        self.start_analysis(text)
    }

    fn start_analysis(&mut self, text: String) -> Task<Message> {
        if text.is_empty() || self.is_busy() {
            return Task::none();
        }
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        self.is_analyzing = true;
        self.agent_error = None;
        self.append_log(&MessagePrefix::Request.format("POST /classify, /resolve"));

        Task::perform(
            async move { client.analyze_question(&text).await },
            |result| Message::AnalysisReady(result.map_err(error_text)),
        )
    }

    /// Handle classification plus resolution for free text.
    pub fn handle_analysis_ready(&mut self, result: Result<(Analysis, String), String>) {
        self.is_analyzing = false;
        match result {
            Ok((analysis, answer)) => {
                self.append_log(&MessagePrefix::Success.format(&format!(
                    "Analyzed: {} / {} / {}",
                    analysis.topic, analysis.sentiment, analysis.priority
                )));
                self.set_current_response(analysis, &answer);
            }
            Err(e) => {
                tracing::error!("Analysis failed: {}", e);
                self.append_log(&MessagePrefix::Error.format(&format!("Analysis failed: {}", e)));
                self.agent_error = Some(e);
            }
        }
    }

    /// Classify and resolve one table row.
    pub fn generate_response_for(&mut self, id: TicketId) -> Task<Message> {
        if self.is_busy() {
            return Task::none();
        }
        let Some(ticket) = self.tickets.iter().find(|t| t.id == id).cloned() else {
            tracing::warn!("No ticket with id {}", id);
            return Task::none();
        };
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        self.generating_for = Some(id.clone());
        self.append_log(&MessagePrefix::Request.format(&format!("Generate response for #{}", id)));

        let generation = self.load_generation;
        Task::perform(
            async move { client.generate_ticket_response(&ticket).await },
            move |result| Message::TicketResponseReady(generation, id, result.map_err(error_text)),
        )
    }

    /// Store a row's response and show it in the agent view.
    ///
    /// Responses for a table that has since been reloaded are dropped.
    pub fn handle_ticket_response(
        &mut self,
        generation: u64,
        id: TicketId,
        result: Result<(Analysis, String), String>,
    ) {
        if self.generating_for.as_ref() == Some(&id) {
            self.generating_for = None;
        }

        if generation != self.load_generation {
            tracing::debug!("Dropping response for #{} from a replaced ticket set", id);
            self.append_log(&MessagePrefix::Warning.format(&format!(
                "Response for #{} discarded: tickets were reloaded",
                id
            )));
            return;
        }

        match result {
            Ok((analysis, answer)) => {
                self.append_log(&MessagePrefix::Success.format(&format!(
                    "Response ready for #{}",
                    id
                )));
                self.ticket_responses.insert(id, render_response(&answer));
                self.set_current_response(analysis, &answer);
                self.agent_error = None;
                self.view = View::Agent;
            }
            Err(e) => {
                tracing::error!("Response generation for #{} failed: {}", id, e);
                self.append_log(&MessagePrefix::Error.format(&format!(
                    "Response for #{} failed: {}",
                    id, e
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, AppInit, View};
    use triage_core::config::Settings;
    use triage_core::api::StreamEvent;
    use triage_core::models::{Analysis, BulkResult, Ticket, TicketId};
    use triage_core::render::RenderedLine;

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

    fn analysis() -> Analysis {
        Analysis {
            topic: "SSO".into(),
            sentiment: "Curious".into(),
            priority: "P1".into(),
        }
    }

    #[test]
    fn blank_input_does_not_start_analysis() {
        let mut app = app();
        app.quick_text = "   ".into();
        let _ = app.quick_classify();
        assert!(!app.is_analyzing);
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn quick_classify_switches_to_agent() {
        let mut app = app();
        app.quick_text = "How do I rotate API keys?".into();
        let _ = app.quick_classify();
        assert!(app.is_analyzing);
        assert_eq!(app.view, View::Agent);

        // A second submit while running is ignored
        let _ = app.analyze_editor_text();
        assert!(app.is_analyzing);
    }

    #[test]
    fn ticket_response_is_stored_and_shown() {
        let mut app = app();
        let id = TicketId::new("42");
        app.generating_for = Some(id.clone());

        app.handle_ticket_response(
            app.load_generation,
            id.clone(),
            Ok((analysis(), "See:\n- https://docs.example.com/keys".into())),
        );

        assert!(app.generating_for.is_none());
        assert_eq!(app.view, View::Agent);
        assert_eq!(app.current_analysis, Some(analysis()));
        assert_eq!(
            app.response_for(&id).map(|lines| lines.len()),
            Some(2)
        );
        assert_eq!(
            app.current_response[1],
            RenderedLine::SourceLink("https://docs.example.com/keys".into())
        );
    }

    #[test]
    fn analysis_failure_keeps_previous_result() {
        let mut app = app();
        app.handle_analysis_ready(Ok((analysis(), "First".into())));
        app.is_analyzing = true;
        app.handle_analysis_ready(Err("HTTP 500: Classification failed".into()));

        assert!(!app.is_analyzing);
        assert_eq!(app.current_analysis, Some(analysis()));
        assert_eq!(app.agent_error.as_deref(), Some("HTTP 500: Classification failed"));
    }

    fn row(id: &str, subject: &str) -> Ticket {
        Ticket {
            id: TicketId::new(id),
            subject: subject.into(),
            body: format!("{} body", subject),
            classification: analysis(),
        }
    }

    #[test]
    fn response_for_replaced_table_is_dropped() {
        let mut app = app();
        app.tickets = vec![row("1", "Old SSO ticket")];

        let _ = app.generate_response_for(TicketId::new("1"));
        assert_eq!(app.generating_for, Some(TicketId::new("1")));
        assert!(!app.can_upload());
        let issued = app.load_generation;

        // The table is replaced by a stream that reuses the id
        let _ = app.start_streaming(Vec::new());
        let data: BulkResult = serde_json::from_value(serde_json::json!({
            "id": "1",
            "classification": { "original_question": "New billing question" }
        }))
        .unwrap();
        app.handle_stream_event(Ok(StreamEvent::Ticket { data }));

        app.handle_ticket_response(
            issued,
            TicketId::new("1"),
            Ok((analysis(), "Answer for the old ticket".into())),
        );

        assert!(app.generating_for.is_none());
        assert_eq!(app.view, View::Dashboard);
        assert_eq!(app.tickets[0].subject, "New billing question");
        assert!(app.response_for(&TicketId::new("1")).is_none());
        assert!(app.current_analysis.is_none());
    }
}
