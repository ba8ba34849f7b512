//! Consumer for the `/bulk_classify_stream` event stream.
//!
//! The body is a sequence of `data: {json}` lines. Chunks from the network do
//! not line up with lines, so bytes are buffered until a newline arrives and
//! only then decoded. A multi-byte character split across chunks therefore
//! decodes the same as if it had arrived whole.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::{BoxStream, Stream, StreamExt};
use serde::Deserialize;
use serde_json::Value;

use super::ApiError;
use crate::models::BulkResult;

const DATA_PREFIX: &str = "data: ";

/// Response body as delivered by reqwest.
pub type ByteStream = BoxStream<'static, Result<Bytes, reqwest::Error>>;

/// Line buffer and `data:` payload parser.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    /// Bytes of `buffer` already known to hold no newline.
    scanned: usize,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the JSON payload of every line it completed.
    ///
    /// The trailing partial line stays buffered until the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
            let end = self.scanned + offset;
            if let Some(value) = parse_line(&self.buffer[start..end]) {
                payloads.push(value);
            }
            start = end + 1;
            self.scanned = start;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();
        payloads
    }

    /// Bytes received after the last newline.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

fn parse_line(raw: &[u8]) -> Option<Value> {
    let line = String::from_utf8_lossy(raw);
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload.is_empty() {
        return None;
    }

    match serde_json::from_str(payload) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Skipping malformed stream frame: {} ({})", e, payload);
            None
        }
    }
}

/// Typed view of one stream frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Classification started; `total` tickets will follow.
    Start {
        #[serde(default)]
        total: usize,
    },
    /// One ticket classified.
    Ticket { data: BulkResult },
    /// One ticket failed on the backend.
    Error {
        #[serde(default)]
        data: Value,
    },
    /// No more frames follow.
    Complete,
    #[serde(other)]
    Unknown,
}

impl StreamEvent {
    /// Interpret a parsed frame. Frames of a known type with the wrong shape
    /// are logged and dropped.
    pub fn from_value(value: Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!("Ignoring stream frame with unexpected shape: {}", e);
                None
            }
        }
    }
}

/// Adapts a chunked response body into a stream of [`StreamEvent`]s.
///
/// Ends right after yielding [`StreamEvent::Complete`] without reading any
/// further from the body, or when the body ends. A transport error is
/// yielded once and ends the stream.
pub struct TicketEventStream<S = ByteStream> {
    body: S,
    decoder: SseDecoder,
    ready: VecDeque<StreamEvent>,
    finished: bool,
}

impl<S> TicketEventStream<S> {
    pub fn new(body: S) -> Self {
        Self {
            body,
            decoder: SseDecoder::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }
}

impl<S, B> Stream for TicketEventStream<S>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    type Item = Result<StreamEvent, ApiError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.finished {
                return Poll::Ready(None);
            }

            if let Some(event) = this.ready.pop_front() {
                if event == StreamEvent::Complete {
                    this.finished = true;
                    this.ready.clear();
                }
                return Poll::Ready(Some(Ok(event)));
            }

            match this.body.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    this.ready.extend(
                        this.decoder
                            .feed(chunk.as_ref())
                            .into_iter()
                            .filter_map(StreamEvent::from_value),
                    );
                }
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(ApiError::Stream(e))));
                }
                Poll::Ready(None) => {
                    if !this.decoder.pending().is_empty() {
                        tracing::debug!(
                            "Dropping {} bytes of unterminated stream line",
                            this.decoder.pending().len()
                        );
                    }
                    this.finished = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use serde_json::json;

    const BODY: &str = concat!(
        "data: {\"type\": \"start\", \"total\": 2}\n\n",
        "data: {\"type\": \"ticket\", \"data\": {\"id\": \"1\", \"classification\": {\"label\": [\"SSO\"], \"original_question\": \"Caf\u{e9} login\"}}}\n\n",
        ": keep-alive comment\n",
        "event: ignored\n",
        "data: {\"type\": \"error\", \"data\": {\"id\": \"2\", \"error\": \"boom\"}}\n\n",
        "data: {\"type\": \"complete\"}\n\n",
    );

    fn chunked(body: &[u8], sizes: &[usize]) -> Vec<Vec<u8>> {
        let mut chunks = Vec::new();
        let mut rest = body;
        let mut i = 0;
        while !rest.is_empty() {
            let n = sizes[i % sizes.len()].clamp(1, rest.len());
            chunks.push(rest[..n].to_vec());
            rest = &rest[n..];
            i += 1;
        }
        chunks
    }

    fn decode_all(chunks: &[Vec<u8>]) -> Vec<Value> {
        let mut decoder = SseDecoder::new();
        chunks.iter().flat_map(|c| decoder.feed(c)).collect()
    }

    fn body_stream(
        chunks: Vec<Vec<u8>>,
    ) -> impl Stream<Item = Result<Vec<u8>, reqwest::Error>> + Unpin {
        stream::iter(chunks.into_iter().map(Ok))
    }

    #[test]
    fn chunk_boundaries_do_not_change_output() {
        let whole = decode_all(&[BODY.as_bytes().to_vec()]);
        assert_eq!(whole.len(), 4);

        for sizes in [&[1][..], &[2, 3], &[7], &[5, 1, 13], &[64]] {
            let split = decode_all(&chunked(BODY.as_bytes(), sizes));
            assert_eq!(split, whole, "chunk sizes {sizes:?}");
        }
    }

    #[test]
    fn split_multibyte_character_survives() {
        let line = "data: {\"type\": \"ticket\", \"data\": {\"id\": \"x\", \"classification\": {\"original_question\": \"na\u{ef}ve \u{1f600}\"}}}\n";
        let bytes = line.as_bytes();
        let emoji_at = line.find('\u{1f600}').unwrap();

        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(&bytes[..emoji_at + 2]).is_empty());
        let values = decoder.feed(&bytes[emoji_at + 2..]);

        assert_eq!(
            values[0]["data"]["classification"]["original_question"],
            json!("na\u{ef}ve \u{1f600}")
        );
    }

    #[test]
    fn malformed_json_is_skipped() {
        crate::logging::init_test_tracing();
        let mut decoder = SseDecoder::new();
        let values = decoder.feed(
            b"data: {\"type\": \"start\"\ndata: not json\ndata: {\"type\": \"complete\"}\n",
        );
        assert_eq!(values, vec![json!({"type": "complete"})]);
    }

    #[test]
    fn only_exact_data_prefix_counts() {
        let mut decoder = SseDecoder::new();
        let values = decoder.feed(b"data:{\"a\":1}\n  data: {\"b\":2}\ndata: \ndata: {\"c\":3}\r\n");
        assert_eq!(values, vec![json!({"c": 3})]);
    }

    #[test]
    fn partial_line_stays_buffered() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"type\":").is_empty());
        assert_eq!(decoder.pending(), b"data: {\"type\":");
        assert_eq!(decoder.feed(b" \"complete\"}\n"), vec![json!({"type": "complete"})]);
        assert!(decoder.pending().is_empty());
    }

    #[test]
    fn long_line_fed_byte_by_byte() {
        let question = "x".repeat(20_000);
        let line = format!(
            "data: {{\"type\": \"ticket\", \"q\": \"{}\"}}\ndata: {{\"n\": 2}}\ndata: {{\"n\"",
            question
        );

        let mut decoder = SseDecoder::new();
        let mut values = Vec::new();
        for byte in line.as_bytes() {
            values.extend(decoder.feed(std::slice::from_ref(byte)));
        }

        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["q"].as_str().map(str::len), Some(20_000));
        assert_eq!(values[1], json!({"n": 2}));
        assert_eq!(decoder.pending(), b"data: {\"n\"");
    }

    #[test]
    fn events_are_typed() {
        let events: Vec<_> = decode_all(&[BODY.as_bytes().to_vec()])
            .into_iter()
            .filter_map(StreamEvent::from_value)
            .collect();

        assert_eq!(events[0], StreamEvent::Start { total: 2 });
        match &events[1] {
            StreamEvent::Ticket { data } => {
                assert_eq!(data.id.as_ref().map(|id| id.as_str()), Some("1"));
                assert_eq!(data.classification.label, vec!["SSO".to_string()]);
            }
            other => panic!("expected ticket, got {other:?}"),
        }
        assert!(matches!(events[2], StreamEvent::Error { .. }));
        assert_eq!(events[3], StreamEvent::Complete);
    }

    #[test]
    fn unknown_types_are_ignored_not_fatal() {
        assert_eq!(
            StreamEvent::from_value(json!({"type": "heartbeat", "at": 3})),
            Some(StreamEvent::Unknown)
        );
        assert_eq!(StreamEvent::from_value(json!({"type": "ticket"})), None);
    }

    #[tokio::test]
    async fn stream_stops_at_complete() {
        let body = format!(
            "{}data: {{\"type\": \"ticket\", \"data\": {{\"id\": \"late\"}}}}\n",
            BODY
        );
        let mut chunks = chunked(body.as_bytes(), &[9]);
        chunks.push(b"data: {\"type\": \"start\", \"total\": 99}\n".to_vec());

        let events: Vec<_> = TicketEventStream::new(body_stream(chunks))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(events.len(), 4);
        assert_eq!(events.last(), Some(&StreamEvent::Complete));
    }

    #[tokio::test]
    async fn complete_in_first_chunk_leaves_rest_unread() {
        let polled = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = polled.clone();
        let chunks = vec![
            b"data: {\"type\": \"complete\"}\ndata: {\"type\": \"start\"}\n".to_vec(),
            b"data: {\"type\": \"start\"}\n".to_vec(),
        ];
        let body = stream::iter(chunks).map(move |c| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok::<_, reqwest::Error>(c)
        });

        let events: Vec<_> = TicketEventStream::new(body).collect().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Ok(StreamEvent::Complete)));
        assert_eq!(polled.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn body_end_without_complete_just_ends() {
        let chunks = vec![b"data: {\"type\": \"start\", \"total\": 1}\ndata: {\"type\":".to_vec()];
        let events: Vec<_> = TicketEventStream::new(body_stream(chunks)).collect().await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Ok(StreamEvent::Start { total: 1 })));
    }
}
