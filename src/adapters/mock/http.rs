//! Recording [`HttpClient`] double.
//!
//! Routes are matched by exact URL first, then by the longest configured
//! prefix, then the default. Every call is recorded, including the ones that
//! fail, so tests can assert that nothing reached the backend.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// One call made against the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Headers,
    /// Present for POST.
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Body decoded lossily as UTF-8, handy for multipart assertions.
    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

/// Canned reply for a route.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<(String, MockResponse)>,
    fallback: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    fn route(&self, url: &str) -> Option<&MockResponse> {
        if let Some((_, response)) = self.routes.iter().find(|(route, _)| route == url) {
            return Some(response);
        }
        self.routes
            .iter()
            .filter(|(route, _)| url.starts_with(route.as_str()))
            .max_by_key(|(route, _)| route.len())
            .map(|(_, response)| response)
            .or(self.fallback.as_ref())
    }
}

/// Cloneable handle; clones share routes and the request log.
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.set_response(
///     "http://backend.test/health",
///     MockResponse::Success(Response::new(200, Bytes::from("{}"))),
/// );
/// http.get("http://backend.test/health", &Headers::new()).await?;
/// assert_eq!(http.requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the log from the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reply for `url` and every URL it prefixes. Replaces an earlier route
    /// with the same key.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut state = self.state();
        state.routes.retain(|(route, _)| route != url);
        state.routes.push((url.to_string(), response));
    }

    /// Reply for URLs matching no route.
    pub fn set_default_response(&self, response: MockResponse) {
        self.state().fallback = Some(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    fn handle(
        &self,
        method: &'static str,
        url: &str,
        headers: &Headers,
        body: Option<Bytes>,
    ) -> Result<Response, HttpError> {
        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
        match state.route(url) {
            Some(MockResponse::Success(response)) => Ok(response.clone()),
            Some(MockResponse::Error(err)) => Err(err.clone()),
            None => Err(HttpError::Other(format!("no mock route for {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("GET", url, headers, None)
    }

    async fn post(&self, url: &str, body: Bytes, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("POST", url, headers, Some(body))
    }
}
