//! Chart images embedded in the reports payload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart is empty")]
    Empty,

    #[error("Chart is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Chart is not a PNG image")]
    NotPng,
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Decode a chart value into PNG bytes.
///
/// Accepts a `data:` URI (everything after the first comma is the payload)
/// or a bare base64 string.
pub fn decode_chart(value: &str) -> Result<Vec<u8>, ChartError> {
    let value = value.trim();
    let payload = if value.starts_with("data:") {
        value.split_once(',').map(|(_, data)| data).unwrap_or_default()
    } else {
        value
    };

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(ChartError::Empty);
    }

    let bytes = STANDARD.decode(cleaned)?;
    if !bytes.starts_with(PNG_SIGNATURE) {
        return Err(ChartError::NotPng);
    }
    Ok(bytes)
}
