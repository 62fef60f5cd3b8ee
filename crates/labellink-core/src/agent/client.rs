//! Retrying HTTP requester for the print agent.
//!
//! Every call to the agent funnels through [`AgentClient::request`]: a bounded
//! sequence of attempts, sequential and with no delay between them. Non-final
//! failures are swallowed; the last failure's message surfaces when all
//! attempts are spent.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::AgentError;

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Agent connection settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the agent; endpoint suffixes are appended as-is.
    pub base_url: String,
    /// Per-request timeout. A timeout counts as an ordinary transport
    /// failure and feeds the retry loop.
    pub timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9100/".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP method for an agent request. The agent protocol only needs these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Description of one agent request.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestConfig {
    /// Plain GET with no headers or body.
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with a JSON body.
    pub fn post_json(body: String) -> Self {
        Self {
            method: Method::Post,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

/// Response from the agent.
///
/// `body` is `None` when the transport delivered a response whose body could
/// not be read; callers decide whether that is fatal for their operation.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    pub status: u16,
    pub body: Option<String>,
}

/// Client for the local print agent.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct AgentClient {
    config: AgentConfig,
    http: reqwest::Client,
}

impl AgentClient {
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::TransportExhausted(format!("HTTP client error: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Issue a request with the default attempt budget.
    pub async fn request(
        &self,
        endpoint: &str,
        request: RequestConfig,
    ) -> Result<AgentResponse, AgentError> {
        self.request_with_attempts(endpoint, request, DEFAULT_MAX_ATTEMPTS)
            .await
    }

    /// Issue a request, retrying up to `max_attempts` times.
    pub async fn request_with_attempts(
        &self,
        endpoint: &str,
        request: RequestConfig,
        max_attempts: u32,
    ) -> Result<AgentResponse, AgentError> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        retry(max_attempts, || self.try_send(&url, &request)).await
    }

    /// One attempt: transport errors and non-2xx statuses both fail it.
    async fn try_send(
        &self,
        url: &str,
        request: &RequestConfig,
    ) -> Result<AgentResponse, String> {
        let mut builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        // An unreadable body is not an attempt failure; the agent did answer.
        let body = response.text().await.ok();

        Ok(AgentResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Run `op` up to `max_attempts` times, returning the first success.
///
/// Attempts are sequential and immediate. The final attempt's error message
/// is folded into [`AgentError::TransportExhausted`]; an empty message
/// becomes "Unknown error". Values of `max_attempts` below 1 are clamped
/// to 1.
pub async fn retry<T, F, Fut>(max_attempts: u32, mut op: F) -> Result<T, AgentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_error: Option<String> = None;

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(message) => {
                debug!(attempt, max_attempts, %message, "agent request attempt failed");
                last_error = Some(message);
            }
        }
    }

    warn!(max_attempts, "agent request attempts exhausted");

    let message = last_error
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string());

    Err(AgentError::TransportExhausted(message))
}
