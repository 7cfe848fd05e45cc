//! Metrics fetch for `GET /metrics/{id}`.
//!
//! The upload response names a backend-side file such as
//! `/srv/output/abc123_metrics.json`; the id is the file name without the
//! `_metrics.json` suffix.

use std::sync::Arc;

use thiserror::Error;

use crate::config::MetricsFallback;
use crate::models::SessionMetrics;
use crate::traits::{Headers, HttpClient, HttpError};

/// Suffix stripped from the metrics file name to obtain the id.
pub const METRICS_FILE_SUFFIX: &str = "_metrics.json";

/// Error type for metrics retrieval.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("cannot derive a metrics id from '{0}'")]
    InvalidPath(String),

    #[error("metrics request failed: {0}")]
    Transport(#[from] HttpError),

    #[error("metrics request returned HTTP {status}")]
    Status { status: u16 },

    #[error("metrics document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl MetricsError {
    fn allows_placeholder(&self) -> bool {
        matches!(self, MetricsError::Transport(_) | MetricsError::Decode(_))
    }
}

/// What happened to the metrics for a processed video.
///
/// Keeps "no metrics were offered" apart from "fetching them failed".
#[derive(Debug)]
pub enum MetricsOutcome {
    Fetched(SessionMetrics),
    /// The upload response carried no `X-Metrics-Path` header.
    NotProvided,
    Failed(MetricsError),
    /// Fetch failed and the configured placeholder was substituted.
    Placeholder {
        metrics: SessionMetrics,
        cause: MetricsError,
    },
}

impl MetricsOutcome {
    /// Apply the fallback policy to a fetch result.
    ///
    /// Only transport and decode failures are masked by the placeholder. A
    /// backend that answered with a non-200 status, or a path with no usable
    /// id, always yields [`MetricsOutcome::Failed`].
    pub fn from_fetch(result: Result<SessionMetrics, MetricsError>, fallback: MetricsFallback) -> Self {
        match (result, fallback) {
            (Ok(metrics), _) => MetricsOutcome::Fetched(metrics),
            (Err(cause), MetricsFallback::Placeholder) if cause.allows_placeholder() => {
                MetricsOutcome::Placeholder {
                    metrics: SessionMetrics::placeholder(),
                    cause,
                }
            }
            (Err(cause), _) => MetricsOutcome::Failed(cause),
        }
    }

    /// Metrics to show, if any.
    pub fn metrics(&self) -> Option<&SessionMetrics> {
        match self {
            MetricsOutcome::Fetched(metrics) | MetricsOutcome::Placeholder { metrics, .. } => {
                Some(metrics)
            }
            MetricsOutcome::NotProvided | MetricsOutcome::Failed(_) => None,
        }
    }

    pub fn into_metrics(self) -> Option<SessionMetrics> {
        match self {
            MetricsOutcome::Fetched(metrics) | MetricsOutcome::Placeholder { metrics, .. } => {
                Some(metrics)
            }
            MetricsOutcome::NotProvided | MetricsOutcome::Failed(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, MetricsOutcome::Placeholder { .. })
    }

    /// The fetch error, including one masked by a placeholder.
    pub fn error(&self) -> Option<&MetricsError> {
        match self {
            MetricsOutcome::Failed(cause) | MetricsOutcome::Placeholder { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Derive the metrics id from an `X-Metrics-Path` value.
///
/// Takes the last path component and strips [`METRICS_FILE_SUFFIX`]. A name
/// without the suffix is used as-is.
pub fn metrics_id_from_path(path: &str) -> Option<String> {
    let file_name = path
        .trim()
        .rsplit(|c: char| c == '/' || c == '\\')
        .find(|segment| !segment.is_empty())?;
    let id = file_name.strip_suffix(METRICS_FILE_SUFFIX).unwrap_or(file_name);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Client for the metrics endpoint.
#[derive(Debug, Clone)]
pub struct MetricsClient<C: HttpClient> {
    http: Arc<C>,
    base_url: String,
}

impl<C: HttpClient> MetricsClient<C> {
    pub fn new(http: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, id: &str) -> String {
        format!("{}/metrics/{}", self.base_url, urlencoding::encode(id))
    }

    /// Fetch and decode the metrics document for `id`.
    pub async fn fetch(&self, id: &str) -> Result<SessionMetrics, MetricsError> {
        let url = self.url_for(id);
        tracing::debug!("Fetching metrics from {}", url);

        let response = self.http.get(&url, &Headers::new()).await?;
        if !response.is_ok() {
            return Err(MetricsError::Status {
                status: response.status,
            });
        }

        let metrics: SessionMetrics = response.json()?;
        if !metrics.reps_consistent() {
            tracing::warn!(
                "Metrics report {} reps but {} rep speeds",
                metrics.total_reps,
                metrics.rep_speeds.len()
            );
        }
        Ok(metrics)
    }

    /// Resolve an `X-Metrics-Path` value to metrics.
    pub async fn fetch_for_path(&self, metrics_path: &str) -> Result<SessionMetrics, MetricsError> {
        let id = metrics_id_from_path(metrics_path)
            .ok_or_else(|| MetricsError::InvalidPath(metrics_path.to_string()))?;
        self.fetch(&id).await
    }

    /// Full metrics step: header → id → fetch → fallback policy.
    pub async fn resolve(&self, metrics_path: Option<&str>, fallback: MetricsFallback) -> MetricsOutcome {
        let Some(path) = metrics_path else {
            return MetricsOutcome::NotProvided;
        };

        let outcome = MetricsOutcome::from_fetch(self.fetch_for_path(path).await, fallback);
        match &outcome {
            MetricsOutcome::Failed(err) => tracing::warn!("Metrics unavailable: {}", err),
            MetricsOutcome::Placeholder { cause, .. } => {
                tracing::warn!("Metrics fetch failed ({}); using placeholder metrics", cause)
            }
            _ => {}
        }
        outcome
    }
}
