//! Triage backend API: request/response calls and the classification stream.

mod client;
mod error;
mod stream;

pub use client::{ApiClient, ApiResult, HealthStatus};
pub use error::ApiError;
pub use stream::{ByteStream, SseDecoder, StreamEvent, TicketEventStream};
