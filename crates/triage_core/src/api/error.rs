//! Errors from talking to the triage backend.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Stream interrupted: {0}")]
    Stream(reqwest::Error),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The backend reports failures as `{"error": "..."}`; that message is
    /// preferred over the raw body when present.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("no body").to_string()
                } else {
                    trimmed.chars().take(300).collect()
                }
            });
        ApiError::Status { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_backend_error_field() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Question is required"}"#,
        );
        assert_eq!(err.to_string(), "HTTP 400 Bad Request: Question is required");
        assert!(matches!(
            err,
            ApiError::Status { status: StatusCode::BAD_REQUEST, .. }
        ));
    }

    #[test]
    fn falls_back_to_body_text_then_reason() {
        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: upstream down");

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            err.to_string(),
            "HTTP 500 Internal Server Error: Internal Server Error"
        );
    }
}
