//! Data models for Triage Desk.
//!
//! - Tickets as uploaded, as classified by the backend, and as table rows
//! - Priority tiers with their display colors and labels
//! - The reports payload
//! - Local sentiment fallback and sidebar stats

mod priority;
mod report;
mod sentiment;
mod stats;
mod ticket;

pub use priority::{priority_color, priority_label, Priority};
pub use report::{
    Analytics, ChartSpec, HighPriorityTicket, Insight, ReportsResponse, Summary, SummaryCard,
    TopIssues, CHART_ORDER,
};
pub use sentiment::infer_sentiment;
pub use stats::{ClassificationStats, AUTOMATED_TOPICS};
pub use ticket::{
    Analysis, BulkResult, Classification, Ticket, TicketId, TicketInput, DEFAULT_PRIORITY,
    DEFAULT_SENTIMENT, DEFAULT_TOPIC,
};
