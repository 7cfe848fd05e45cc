//! HTTP clients for the analysis backend.
//!
//! - [`upload`] - `POST /analyze-lift/` with the video and plate diameter
//! - [`metrics`] - `GET /metrics/{id}` for the velocity metrics document
//! - [`health`] - `GET /health` readiness probe
//! - [`multipart`] - multipart/form-data body encoding

pub mod health;
pub mod metrics;
pub mod multipart;
pub mod upload;

pub use health::{display_health_check_results, run_health_check, HealthCheckResult, HealthStatus};
pub use metrics::{metrics_id_from_path, MetricsClient, MetricsError, MetricsOutcome};
pub use multipart::MultipartBody;
pub use upload::{build_body, UploadClient, UploadError, UploadOutcome};
