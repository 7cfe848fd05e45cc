//! [`HttpClient`] backed by reqwest, used by the CLI.
//!
//! No request timeout is set: a long upload of a 4K or HDR clip is bounded
//! only by the transport.

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{Headers, HttpClient, HttpError, Response};

#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a preconfigured client, e.g. one with a proxy.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let request = headers
            .iter()
            .fold(request, |request, (name, value)| request.header(name, value));

        let reply = request.send().await.map_err(classify)?;
        let status = reply.status().as_u16();
        let headers = collect_headers(reply.headers());
        let body = reply.bytes().await.map_err(classify)?;
        tracing::debug!("HTTP {} with {} byte body", status, body.len());

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest failure onto the transport error kinds.
fn classify(err: reqwest::Error) -> HttpError {
    let message = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(message)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(message)
    } else if err.is_builder() {
        HttpError::InvalidUrl(message)
    } else if err.is_body() || err.is_decode() {
        HttpError::Io(message)
    } else {
        HttpError::Other(message)
    }
}

/// Header names come back lowercased; non-UTF-8 values are skipped.
fn collect_headers(map: &reqwest::header::HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(self.client.get(url), headers).await
    }

    async fn post(&self, url: &str, body: Bytes, headers: &Headers) -> Result<Response, HttpError> {
        self.send(self.client.post(url).body(body), headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_headers_lowercases_names() {
        let mut map = reqwest::header::HeaderMap::new();
        map.insert(reqwest::header::CONTENT_TYPE, "video/mp4".parse().unwrap());
        map.insert("X-Metrics-Path", "/data/run_metrics.json".parse().unwrap());

        let headers = collect_headers(&map);
        assert_eq!(headers.get("content-type").map(String::as_str), Some("video/mp4"));
        assert_eq!(
            headers.get("x-metrics-path").map(String::as_str),
            Some("/data/run_metrics.json")
        );
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid_url() {
        let client = ReqwestHttpClient::new();
        let result = client.get("not-a-valid-url", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let client = ReqwestHttpClient::new();
        let result = client
            .post("http://127.0.0.1:9/analyze-lift/", Bytes::from_static(b"x"), &Headers::new())
            .await;
        assert!(matches!(
            result,
            Err(HttpError::ConnectionFailed(_)) | Err(HttpError::Other(_))
        ));
    }
}
