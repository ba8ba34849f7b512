//! Turning backend payloads into something the UI can draw.

mod chart;
mod response;

pub use chart::{decode_chart, ChartError};
pub use response::{render_response, RenderedLine};
