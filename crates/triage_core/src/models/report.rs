//! Reports payload returned by `/reports`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chart key in `charts` and the heading it is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub key: &'static str,
    pub title: &'static str,
}

/// Charts in display order.
pub const CHART_ORDER: [ChartSpec; 5] = [
    ChartSpec { key: "topic_distribution", title: "Topic Distribution" },
    ChartSpec { key: "priority_distribution", title: "Priority Distribution" },
    ChartSpec { key: "sentiment_analysis", title: "Sentiment Analysis" },
    ChartSpec { key: "trend_analysis", title: "Trend Analysis" },
    ChartSpec { key: "high_priority_overview", title: "High Priority Overview" },
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsResponse {
    #[serde(default)]
    pub analytics: Analytics,
    #[serde(default)]
    pub charts: BTreeMap<String, String>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub summary: Summary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default)]
    pub topic_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub sentiment_distribution: BTreeMap<String, u64>,
    #[serde(default)]
    pub priority_distribution: BTreeMap<String, u64>,
    /// `[subject, count]` pairs for subjects seen more than once.
    #[serde(default)]
    pub repeated_queries: Vec<Value>,
    #[serde(default)]
    pub high_priority_tickets: Vec<HighPriorityTicket>,
    #[serde(default)]
    pub automation_rate: Option<f64>,
    #[serde(default)]
    pub top_issues: Option<TopIssues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighPriorityTicket {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopIssues {
    #[serde(default)]
    pub most_common_topic: Option<String>,
    #[serde(default)]
    pub most_common_sentiment: Option<String>,
    #[serde(default)]
    pub high_priority_count: Option<u64>,
    #[serde(default)]
    pub repeated_query_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub action: Option<String>,
}

impl Insight {
    /// Title for display; `index` is zero-based.
    pub fn display_title(&self, index: usize) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Insight {}", index + 1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default)]
    pub analysis_date: Option<String>,
    #[serde(default)]
    pub report_type: Option<String>,
}

/// One of the headline numbers above the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

impl ReportsResponse {
    pub fn summary_cards(&self) -> [SummaryCard; 4] {
        let rate = self.analytics.automation_rate.unwrap_or(0.0);
        [
            SummaryCard {
                title: "Total Tickets",
                value: self.summary.total_tickets.to_string(),
            },
            SummaryCard {
                title: "High Priority",
                value: self.analytics.high_priority_tickets.len().to_string(),
            },
            SummaryCard {
                title: "Automation Rate",
                value: format!("{}%", rate),
            },
            SummaryCard {
                title: "Repeated Queries",
                value: self.analytics.repeated_queries.len().to_string(),
            },
        ]
    }

    /// Charts that are present, in display order, paired with their raw value.
    pub fn ordered_charts(&self) -> impl Iterator<Item = (ChartSpec, &str)> {
        CHART_ORDER.iter().filter_map(move |spec| {
            self.charts
                .get(spec.key)
                .filter(|v| !v.is_empty())
                .map(|v| (*spec, v.as_str()))
        })
    }

    /// Chart generation failure reported by the backend.
    pub fn chart_error(&self) -> Option<&str> {
        self.charts.get("error").map(String::as_str)
    }
}
