//! HTTP client for the triage backend.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::stream::TicketEventStream;
use super::ApiError;
use crate::config::ApiSettings;
use crate::models::{
    infer_sentiment, Analysis, BulkResult, Classification, ReportsResponse, Ticket, TicketInput,
    DEFAULT_SENTIMENT,
};

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Deserialize)]
struct BulkResponse {
    #[serde(default)]
    results: Vec<BulkResult>,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    #[serde(default)]
    classification: Classification,
}

#[derive(Default, Deserialize)]
struct ResolveResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    routed_message: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl ResolveResponse {
    fn into_text(self) -> String {
        [self.response, self.routed_message, self.reason]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }
}

#[derive(Serialize)]
struct TicketsBody<'a, T> {
    tickets: &'a [T],
}

/// Client for the triage backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    /// Client with default timeouts.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::from_settings(&ApiSettings {
            base_url: base_url.into(),
            ..ApiSettings::default()
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> ApiResult<Self> {
        // No client-wide timeout: the event stream may legitimately run long.
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        tracing::debug!("POST {}", path);
        self.http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.request_timeout)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.post(path).json(body).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Classify a ticket set. `None` asks the backend for its default set.
    pub async fn bulk_classify(&self, tickets: Option<&[TicketInput]>) -> ApiResult<Vec<Ticket>> {
        let body = match tickets {
            Some(tickets) => serde_json::to_value(TicketsBody { tickets })?,
            None => json!({}),
        };
        let response: BulkResponse = self.post_json("/bulk_classify", &body).await?;
        tracing::info!("Classified {} tickets", response.results.len());

        Ok(response
            .results
            .into_iter()
            .map(Ticket::from_bulk_result)
            .collect())
    }

    /// Start streaming classification of `tickets`.
    ///
    /// Returns once the backend has accepted the request; events are then
    /// read lazily from the returned stream.
    pub async fn bulk_classify_stream(
        &self,
        tickets: &[TicketInput],
    ) -> ApiResult<TicketEventStream> {
        tracing::debug!("POST /bulk_classify_stream ({} tickets)", tickets.len());
        let response = self
            .http
            .post(self.url("/bulk_classify_stream"))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .json(&TicketsBody { tickets })
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(TicketEventStream::new(response.bytes_stream().boxed()))
    }

    /// Classify one free-text question.
    pub async fn classify(&self, question: &str) -> ApiResult<Classification> {
        let response: ClassifyResponse = self
            .post_json("/classify", &json!({ "question": question }))
            .await?;
        Ok(response.classification)
    }

    /// Ask the backend to answer or route a classified question.
    ///
    /// Returns the first non-empty of `response`, `routed_message`, `reason`.
    pub async fn resolve(&self, classification: &Classification) -> ApiResult<String> {
        let response: ResolveResponse = self
            .post_json("/resolve", &json!({ "classification": classification }))
            .await?;
        Ok(response.into_text())
    }

    /// Generate analytics, charts and insights for the classified rows.
    pub async fn reports(&self, tickets: &[Ticket]) -> ApiResult<ReportsResponse> {
        self.post_json("/reports", &TicketsBody { tickets }).await
    }

    pub async fn health(&self) -> ApiResult<HealthStatus> {
        let response = self
            .http
            .get(self.url("/health"))
            .timeout(self.request_timeout)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    /// Classify then resolve free text typed into the agent view.
    pub async fn analyze_question(&self, text: &str) -> ApiResult<(Analysis, String)> {
        let classification = self.classify(text).await?;
        let analysis = Analysis::from_classification(&classification, infer_sentiment(text));
        let answer = self.resolve(&classification).await?;
        Ok((analysis, answer))
    }

    /// Classify then resolve an existing table row.
    pub async fn generate_ticket_response(&self, ticket: &Ticket) -> ApiResult<(Analysis, String)> {
        let classification = self.classify(&ticket.question()).await?;
        let analysis = Analysis::from_classification(&classification, DEFAULT_SENTIMENT);
        let answer = self.resolve(&classification).await?;
        Ok((analysis, answer))
    }
}

async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &body);
    tracing::warn!("Backend rejected request: {}", err);
    Err(err)
}
