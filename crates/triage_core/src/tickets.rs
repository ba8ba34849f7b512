//! Reading ticket files picked for upload.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::models::TicketInput;

#[derive(Error, Debug)]
pub enum TicketFileError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of tickets or an object with a \"tickets\" array")]
    Shape,

    #[error("Ticket {index} is not a valid ticket object: {source}")]
    Ticket {
        index: usize,
        source: serde_json::Error,
    },
}

/// Parse an upload: either `[ {...}, ... ]` or `{ "tickets": [ ... ] }`.
pub fn parse_ticket_file(text: &str) -> Result<Vec<TicketInput>, TicketFileError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tickets") {
            Some(Value::Array(items)) => items,
            _ => return Err(TicketFileError::Shape),
        },
        _ => return Err(TicketFileError::Shape),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(TicketFileError::Shape);
            }
            serde_json::from_value(item).map_err(|source| TicketFileError::Ticket { index, source })
        })
        .collect()
}

/// Read and parse a ticket file.
pub async fn load_ticket_file(path: &Path) -> Result<Vec<TicketInput>, TicketFileError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TicketFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let tickets = parse_ticket_file(&text)?;
    tracing::info!("Loaded {} tickets from {}", tickets.len(), path.display());
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn accepts_bare_array() {
        let tickets =
            parse_ticket_file(r#"[{"id": "1", "subject": "Login", "body": "Fails"}, {"subject": "x"}]"#)
                .unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].subject, "Login");
        assert!(tickets[1].id.is_none());
        assert_eq!(tickets[1].body, "");
    }

    #[test]
    fn accepts_tickets_wrapper() {
        let tickets = parse_ticket_file(r#"{"tickets": [{"id": 3, "subject": "s", "body": "b"}]}"#)
            .unwrap();
        assert_eq!(tickets[0].id.as_ref().map(|id| id.as_str()), Some("3"));
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(parse_ticket_file("{}"), Err(TicketFileError::Shape)));
        assert!(matches!(parse_ticket_file("42"), Err(TicketFileError::Shape)));
        assert!(matches!(parse_ticket_file("[1, 2]"), Err(TicketFileError::Shape)));
        assert!(matches!(parse_ticket_file("[{"), Err(TicketFileError::Json(_))));
        assert!(matches!(
            parse_ticket_file(r#"[{"subject": 5}]"#),
            Err(TicketFileError::Ticket { index: 0, .. })
        ));
    }

    #[tokio::test]
    async fn loads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        tokio::fs::write(&path, r#"[{"subject": "a", "body": "b"}]"#)
            .await
            .unwrap();

        let tickets = load_ticket_file(&path).await.unwrap();
        assert_eq!(tickets.len(), 1);

        let missing = load_ticket_file(&dir.path().join("nope.json")).await;
        assert!(matches!(missing, Err(TicketFileError::Read { .. })));
    }
}
