//! Ticket shapes: what gets uploaded, what the backend returns, what the table shows.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const DEFAULT_TOPIC: &str = "Product";
pub const DEFAULT_SENTIMENT: &str = "Neutral";
pub const DEFAULT_PRIORITY: &str = "P2";

/// Ticket identifier. The backend echoes ids as either strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Short random id for results that come back without one.
    pub fn generate() -> Self {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(9);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for TicketId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => TicketId(s),
            Raw::Number(n) => TicketId(n.to_string()),
        })
    }
}

/// A ticket before classification, as uploaded or sent to `/bulk_classify`.
///
/// Fields the dashboard does not know about are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TicketId>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The backend's classification object.
///
/// Round-trips losslessly so `/resolve` receives what `/classify` produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub label: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_question: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of `results[]`, or the payload of a streamed `ticket` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    #[serde(default)]
    pub id: Option<TicketId>,
    #[serde(default)]
    pub classification: Classification,
}

/// Topic, sentiment and priority as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub topic: String,
    pub sentiment: String,
    pub priority: String,
}

impl Analysis {
    /// Fill in view defaults. `fallback_sentiment` is used when the backend
    /// returned no sentiment.
    pub fn from_classification(classification: &Classification, fallback_sentiment: &str) -> Self {
        Self {
            topic: non_empty(classification.label.first().map(String::as_str))
                .unwrap_or(DEFAULT_TOPIC)
                .to_string(),
            sentiment: non_empty(classification.sentiment.as_deref())
                .unwrap_or(fallback_sentiment)
                .to_string(),
            priority: non_empty(classification.priority.as_deref())
                .unwrap_or(DEFAULT_PRIORITY)
                .to_string(),
        }
    }

    pub fn priority(&self) -> super::Priority {
        super::Priority::parse(&self.priority)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A classified row in the ticket table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub subject: String,
    pub body: String,
    pub classification: Analysis,
}

impl Ticket {
    pub fn from_bulk_result(result: BulkResult) -> Self {
        let classification = Analysis::from_classification(&result.classification, DEFAULT_SENTIMENT);
        let question = result.classification.original_question.unwrap_or_default();
        let subject = question.lines().next().unwrap_or_default().to_string();

        Self {
            id: result
                .id
                .filter(|id| !id.as_str().is_empty())
                .unwrap_or_else(TicketId::generate),
            subject,
            body: question,
            classification,
        }
    }

    /// Text sent to `/classify` when generating a response for this row.
    pub fn question(&self) -> String {
        format!("{}\n{}", self.subject, self.body)
    }
}
