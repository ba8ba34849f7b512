//! Sidebar counters over the current ticket rows.

use super::{Priority, Ticket};

/// Topics the backend answers without a human.
pub const AUTOMATED_TOPICS: [&str; 5] = ["How-to", "Product", "Best practices", "API/SDK", "SSO"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    pub total: usize,
    pub high_priority: usize,
    pub automated: usize,
}

impl ClassificationStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut stats, ticket| {
            stats.total += 1;
            if ticket.classification.priority() == Priority::P0 {
                stats.high_priority += 1;
            }
            if AUTOMATED_TOPICS.contains(&ticket.classification.topic.as_str()) {
                stats.automated += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Analysis, TicketId};

    fn row(topic: &str, priority: &str) -> Ticket {
        Ticket {
            id: TicketId::generate(),
            subject: String::new(),
            body: String::new(),
            classification: Analysis {
                topic: topic.into(),
                sentiment: "Neutral".into(),
                priority: priority.into(),
            },
        }
    }

    #[test]
    fn counts_p0_and_automated_topics() {
        let rows = vec![
            row("SSO", "P0"),
            row("Connector", "P0"),
            row("How-to", "P2"),
            row("Lineage", "P1"),
        ];
        let stats = ClassificationStats::from_tickets(&rows);
        assert_eq!(
            stats,
            ClassificationStats {
                total: 4,
                high_priority: 2,
                automated: 2
            }
        );
    }

    #[test]
    fn empty_set_is_all_zero() {
        assert_eq!(ClassificationStats::from_tickets(&[]), ClassificationStats::default());
    }
}
