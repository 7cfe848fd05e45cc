//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use speedfit::adapters::ReqwestHttpClient;
use speedfit::config::BackendConfig;
use speedfit::progress::ProgressConfig;
use speedfit::workflow::AnalysisWorkflow;

/// Metrics document used throughout the backend scenarios.
pub fn metrics_json() -> serde_json::Value {
    serde_json::json!({
        "session_average": 1.8,
        "total_reps": 3,
        "rep_speeds": [1.5, 2.1, 1.8],
        "calibration_used": true,
        "pixels_per_meter": 800.0
    })
}

/// Config pointing at `base_url` with a fast progress simulation.
pub fn test_config(base_url: &str, work_dir: &Path) -> BackendConfig {
    BackendConfig::default()
        .with_base_url(base_url)
        .with_work_dir(work_dir)
        .with_progress(ProgressConfig {
            steps: 5,
            step_interval: Duration::from_millis(2),
            ceiling: 0.9,
        })
}

/// Workflow talking to a real HTTP server through reqwest.
pub fn test_workflow(base_url: &str, work_dir: &Path) -> AnalysisWorkflow<ReqwestHttpClient> {
    AnalysisWorkflow::new(test_config(base_url, work_dir), Arc::new(ReqwestHttpClient::new()))
}

/// Write a fake video file and return its path.
pub fn write_video(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
