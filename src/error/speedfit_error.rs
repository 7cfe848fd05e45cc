//! Unified error type for speedfit.

use std::fmt;

use super::category::ErrorCategory;
use crate::acquisition::AcquisitionError;
use crate::cli::ArgsError;
use crate::client::{MetricsError, UploadError};
use crate::config::ConfigError;
use crate::traits::HttpError;

/// Unified error type.
///
/// Wraps the component errors so the front end can categorize and report
/// any failure the same way.
#[derive(Debug)]
pub enum SpeedfitError {
    /// Importing the input video failed.
    Acquisition(AcquisitionError),

    /// The analysis upload failed.
    Upload(UploadError),

    /// Fetching metrics failed.
    Metrics(MetricsError),

    /// Invalid configuration.
    Config(ConfigError),

    /// Invalid command-line arguments.
    Args(ArgsError),

    /// Other I/O errors.
    Io(std::io::Error),
}

impl SpeedfitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpeedfitError::Acquisition(err) => match err {
                AcquisitionError::Read(_) | AcquisitionError::Write { .. } => ErrorCategory::System,
                _ => ErrorCategory::User,
            },
            SpeedfitError::Upload(err) => match err {
                UploadError::NoVideo | UploadError::Busy => ErrorCategory::User,
                UploadError::ReadVideo { .. } | UploadError::SaveProcessed { .. } => {
                    ErrorCategory::System
                }
                UploadError::Transport(err) => http_category(err),
                UploadError::Status { status, .. } => status_category(*status),
            },
            SpeedfitError::Metrics(err) => match err {
                MetricsError::Transport(err) => http_category(err),
                MetricsError::Status { status } => status_category(*status),
                MetricsError::InvalidPath(_) | MetricsError::Decode(_) => ErrorCategory::Server,
            },
            SpeedfitError::Config(_) => ErrorCategory::Configuration,
            SpeedfitError::Args(_) => ErrorCategory::User,
            SpeedfitError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            SpeedfitError::Upload(UploadError::NoVideo) => {
                "No video selected. Choose a video before analyzing.".to_string()
            }
            SpeedfitError::Upload(UploadError::Busy) => {
                "An analysis is already running. Wait for it to finish.".to_string()
            }
            SpeedfitError::Upload(UploadError::Transport(err)) => {
                format!("Could not reach the analysis backend: {}", err)
            }
            SpeedfitError::Upload(UploadError::Status { status, message }) => {
                let detail = backend_detail(message);
                match detail {
                    Some(detail) => format!("Analysis failed (HTTP {}): {}", status, detail),
                    None => format!("Analysis failed (HTTP {})", status),
                }
            }
            SpeedfitError::Metrics(err) => format!("Metrics unavailable: {}", err),
            SpeedfitError::Args(err) => format!("{}\nRun 'speedfit --help' for usage.", err),
            other => {
                let mut message = other.to_string();
                if let Some(first) = message.get(0..1) {
                    let upper = first.to_uppercase();
                    message.replace_range(0..1, &upper);
                }
                message
            }
        }
    }

    /// Short code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            SpeedfitError::Acquisition(err) => match err {
                AcquisitionError::NotFound { .. } => "ACQ_NOT_FOUND",
                AcquisitionError::UnsupportedFormat { .. } => "ACQ_UNSUPPORTED_FORMAT",
                AcquisitionError::TooLarge { .. } => "ACQ_TOO_LARGE",
                AcquisitionError::Empty => "ACQ_EMPTY",
                AcquisitionError::Read(_) => "ACQ_READ",
                AcquisitionError::Write { .. } => "ACQ_WRITE",
                AcquisitionError::Unavailable(_) => "ACQ_UNAVAILABLE",
            },
            SpeedfitError::Upload(err) => match err {
                UploadError::NoVideo => "UPLOAD_NO_VIDEO",
                UploadError::Busy => "UPLOAD_BUSY",
                UploadError::ReadVideo { .. } => "UPLOAD_READ_VIDEO",
                UploadError::Transport(_) => "UPLOAD_TRANSPORT",
                UploadError::Status { .. } => "UPLOAD_STATUS",
                UploadError::SaveProcessed { .. } => "UPLOAD_SAVE",
            },
            SpeedfitError::Metrics(err) => match err {
                MetricsError::InvalidPath(_) => "METRICS_INVALID_PATH",
                MetricsError::Transport(_) => "METRICS_TRANSPORT",
                MetricsError::Status { .. } => "METRICS_STATUS",
                MetricsError::Decode(_) => "METRICS_DECODE",
            },
            SpeedfitError::Config(_) => "CONFIG_INVALID",
            SpeedfitError::Args(_) => "ARGS_INVALID",
            SpeedfitError::Io(_) => "IO_ERROR",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

fn http_category(err: &HttpError) -> ErrorCategory {
    match err {
        HttpError::InvalidUrl(_) => ErrorCategory::Configuration,
        _ => ErrorCategory::Network,
    }
}

fn status_category(status: u16) -> ErrorCategory {
    match status {
        // The backend rejects unsupported or oversized videos with these.
        400 | 413 => ErrorCategory::User,
        500..=599 => ErrorCategory::Server,
        _ => ErrorCategory::Client,
    }
}

/// Pull `detail` out of a FastAPI-style error body, falling back to the raw
/// text when it is short.
fn backend_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return Some(detail.to_string());
        }
    }
    (body.len() <= 200).then(|| body.to_string())
}

impl fmt::Display for SpeedfitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedfitError::Acquisition(err) => write!(f, "{}", err),
            SpeedfitError::Upload(err) => write!(f, "{}", err),
            SpeedfitError::Metrics(err) => write!(f, "{}", err),
            SpeedfitError::Config(err) => write!(f, "{}", err),
            SpeedfitError::Args(err) => write!(f, "{}", err),
            SpeedfitError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SpeedfitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpeedfitError::Acquisition(err) => Some(err),
            SpeedfitError::Upload(err) => Some(err),
            SpeedfitError::Metrics(err) => Some(err),
            SpeedfitError::Config(err) => Some(err),
            SpeedfitError::Args(err) => Some(err),
            SpeedfitError::Io(err) => Some(err),
        }
    }
}

impl From<AcquisitionError> for SpeedfitError {
    fn from(err: AcquisitionError) -> Self {
        SpeedfitError::Acquisition(err)
    }
}

impl From<UploadError> for SpeedfitError {
    fn from(err: UploadError) -> Self {
        SpeedfitError::Upload(err)
    }
}

impl From<MetricsError> for SpeedfitError {
    fn from(err: MetricsError) -> Self {
        SpeedfitError::Metrics(err)
    }
}

impl From<ConfigError> for SpeedfitError {
    fn from(err: ConfigError) -> Self {
        SpeedfitError::Config(err)
    }
}

impl From<ArgsError> for SpeedfitError {
    fn from(err: ArgsError) -> Self {
        SpeedfitError::Args(err)
    }
}

impl From<std::io::Error> for SpeedfitError {
    fn from(err: std::io::Error) -> Self {
        SpeedfitError::Io(err)
    }
}
