//! Analytics report generation.

use iced::widget::image;
use iced::Task;

use triage_core::logging::MessagePrefix;
use triage_core::models::{ChartSpec, ReportsResponse};
use triage_core::render::decode_chart;

use super::error_text;
use crate::app::{App, Message};

impl App {
    /// Whether the "Generate Reports" button is live.
    pub fn can_generate_reports(&self) -> bool {
        !self.tickets.is_empty() && !self.is_generating_reports
    }

    pub fn generate_reports(&mut self) -> Task<Message> {
        if !self.can_generate_reports() {
            return Task::none();
        }
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        self.is_generating_reports = true;
        self.reports_error = None;
        self.append_log(&MessagePrefix::Request.format(&format!(
            "POST /reports ({} tickets)",
            self.tickets.len()
        )));

        let tickets = self.tickets.clone();
        Task::perform(
            async move { client.reports(&tickets).await },
            |result| Message::ReportsReady(result.map_err(error_text)),
        )
    }

    pub fn handle_reports_ready(&mut self, result: Result<ReportsResponse, String>) {
        self.is_generating_reports = false;
        match result {
            Ok(report) => {
                self.append_log(&MessagePrefix::Success.format(&format!(
                    "Report ready: {} charts, {} insights",
                    report.ordered_charts().count(),
                    report.insights.len()
                )));
                if let Some(err) = report.chart_error() {
                    tracing::warn!("Backend could not draw charts: {}", err);
                }
                self.report_charts = decode_charts(&report);
                self.reports = Some(report);
            }
            Err(e) => {
                tracing::error!("Failed to generate reports: {}", e);
                self.append_log(&MessagePrefix::Error.format(&format!(
                    "Failed to generate reports: {}",
                    e
                )));
                self.reports_error = Some(e);
            }
        }
    }
}

fn decode_charts(report: &ReportsResponse) -> Vec<(ChartSpec, Option<image::Handle>)> {
    report
        .ordered_charts()
        .map(|(spec, value)| match decode_chart(value) {
            Ok(png) => (spec, Some(image::Handle::from_bytes(png))),
            Err(e) => {
                tracing::warn!("Chart {} failed to decode: {}", spec.key, e);
                (spec, None)
            }
        })
        .collect()
}
