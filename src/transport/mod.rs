//! HTTP transport seam.
//!
//! The dispatcher depends only on the [`HttpTransport`] trait: one call in,
//! status and raw bytes out, or a classified [`TransportError`]. The
//! reqwest-backed implementation is the production default; [`MockTransport`]
//! records requests and serves queued responses for tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::TransportError;

/// HTTP method subset used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A single outgoing HTTP call. Body encoding (JSON vs form) happens before
/// this point; the transport only sees bytes and headers.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    /// Ordered header pairs.
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Value of the first header matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP response: status plus unparsed body bytes.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Transport interface (for dependency injection).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a single HTTP call. HTTP-level failures (non-2xx) surface as
    /// [`TransportError::Status`] carrying the response body.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Default reqwest-based transport.
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport with the given timeout. TLS certificate
    /// verification stays enabled unless explicitly disabled.
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| TransportError::ConnectionFailed {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let timeout = self.timeout;
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout { timeout }
            } else {
                TransportError::ConnectionFailed {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidBody {
                message: e.to_string(),
            })?;

        if !(200..300).contains(&status) {
            return Err(TransportError::Status { status, body });
        }

        Ok(TransportResponse { status, body })
    }
}

/// In-memory transport for tests: serves queued results in order and keeps
/// a history of every request it saw.
#[derive(Default)]
pub struct MockTransport {
    results: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    history: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to serve.
    pub fn queue_response(&self, response: TransportResponse) -> &Self {
        self.results.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queue a JSON response with the given status.
    pub fn queue_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.queue_response(TransportResponse {
            status,
            body: Bytes::from(serde_json::to_vec(body).unwrap()),
        })
    }

    /// Queue an error to serve.
    pub fn queue_error(&self, error: TransportError) -> &Self {
        self.results.lock().unwrap().push_back(Err(error));
        self
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.history.lock().unwrap().clone()
    }

    /// Number of calls performed.
    pub fn call_count(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.history.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.history.lock().unwrap().push(request);

        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::ConnectionFailed {
                    message: "no mock response queued".to_string(),
                })
            })
    }
}
