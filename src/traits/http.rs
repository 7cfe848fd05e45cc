//! HTTP transport seam.
//!
//! The upload, metrics and health clients reach the backend only through
//! [`HttpClient`], so tests can swap in
//! [`MockHttpClient`](crate::adapters::MockHttpClient).

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Request or response headers. Names are compared case-insensitively by
/// [`Response::header`].
pub type Headers = HashMap<String, String>;

/// Status, headers and fully buffered body of a backend reply.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The backend signals success with exactly 200.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure. HTTP error statuses are not errors here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Other(String),
}

/// Minimal client surface the backend needs: GET, and POST of a pre-encoded
/// body.
///
/// ```ignore
/// use speedfit::traits::{HttpClient, Headers, HttpError};
///
/// async fn probe<C: HttpClient>(client: &C) -> Result<bool, HttpError> {
///     let response = client.get("http://localhost:8000/health", &Headers::new()).await?;
///     Ok(response.is_ok())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// The caller supplies `Content-Type`; multipart bodies arrive encoded.
    async fn post(&self, url: &str, body: Bytes, headers: &Headers) -> Result<Response, HttpError>;
}
