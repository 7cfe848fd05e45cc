//! Backend health probe.
//!
//! Calls `GET /health` and reports whether the backend is reachable and
//! has its detection model loaded. Run on demand by `speedfit health`.

use serde::Deserialize;

use crate::traits::{Headers, HttpClient};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Result of a health check.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheckResult {
    pub backend_healthy: bool,
    pub response_time_ms: Option<u64>,
    pub model_loaded: bool,
    pub error_message: Option<String>,
}

impl HealthCheckResult {
    fn unreachable(message: String) -> Self {
        Self {
            backend_healthy: false,
            response_time_ms: None,
            model_loaded: false,
            error_message: Some(message),
        }
    }

    /// Whether an analysis request can be expected to succeed.
    pub fn ready(&self) -> bool {
        self.backend_healthy && self.model_loaded
    }
}

/// Probe the backend at `base_url`.
pub async fn run_health_check<C: HttpClient + ?Sized>(http: &C, base_url: &str) -> HealthCheckResult {
    let url = format!("{}/health", base_url);
    let start = std::time::Instant::now();

    let response = match http.get(&url, &Headers::new()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Health check against {} failed: {}", url, e);
            return HealthCheckResult::unreachable(e.to_string());
        }
    };
    let elapsed = start.elapsed().as_millis() as u64;

    if !response.is_ok() {
        return HealthCheckResult {
            backend_healthy: false,
            response_time_ms: Some(elapsed),
            model_loaded: false,
            error_message: Some(format!("health endpoint returned HTTP {}", response.status)),
        };
    }

    match response.json::<HealthStatus>() {
        Ok(status) => {
            let healthy = status.status.eq_ignore_ascii_case("healthy");
            HealthCheckResult {
                backend_healthy: healthy,
                response_time_ms: Some(elapsed),
                model_loaded: status.model_loaded,
                error_message: (!healthy).then(|| format!("backend reports status '{}'", status.status)),
            }
        }
        Err(e) => HealthCheckResult {
            backend_healthy: false,
            response_time_ms: Some(elapsed),
            model_loaded: false,
            error_message: Some(format!("unexpected health response: {}", e)),
        },
    }
}

/// Print health check results for the terminal.
pub fn display_health_check_results(result: &HealthCheckResult, base_url: &str) {
    println!();

    if !result.backend_healthy {
        println!("✗ Backend not responding at {}", base_url);
        if let Some(ref message) = result.error_message {
            println!("  {}", message);
        }
        println!("  Make sure the server is running, e.g.:");
        println!("    uvicorn main:app --host 0.0.0.0 --port 8000");
        println!("  and that SPEEDFIT_BACKEND_URL (or --url) points at it.\n");
        return;
    }

    match result.response_time_ms {
        Some(ms) => println!("✓ Backend responding ({}ms)", ms),
        None => println!("✓ Backend healthy"),
    }

    if result.model_loaded {
        println!("✓ Detection model loaded");
        println!("\n✓ Ready to analyze lifts!\n");
    } else {
        println!("✗ Detection model not loaded");
        println!("  Uploads will fail until the backend finds models/best.pt.\n");
    }
}
