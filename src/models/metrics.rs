//! Velocity metrics produced by the analysis backend.

use serde::{Deserialize, Serialize};

/// Metrics document returned by `GET /metrics/{id}`.
///
/// The client never computes or mutates these values; it only decodes and
/// renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Average bar velocity across the session in m/s. `null` when the
    /// backend could not track any rep.
    #[serde(default)]
    pub session_average: Option<f64>,
    pub total_reps: u32,
    /// Per-rep velocity in m/s, in rep order.
    pub rep_speeds: Vec<f64>,
    /// Whether the plate was found and used to convert pixels to meters.
    pub calibration_used: bool,
    pub pixels_per_meter: f64,
}

impl SessionMetrics {
    /// Development fixture the mobile build substituted when the metrics
    /// fetch failed. Only handed out when the placeholder fallback is enabled.
    pub fn placeholder() -> Self {
        Self {
            session_average: Some(1.8),
            total_reps: 3,
            rep_speeds: vec![1.5, 2.1, 1.8],
            calibration_used: true,
            pixels_per_meter: 800.0,
        }
    }

    /// Fastest rep, or `None` when no reps were recorded.
    pub fn best_rep_speed(&self) -> Option<f64> {
        self.rep_speeds.iter().copied().reduce(f64::max)
    }

    /// Arithmetic mean of the per-rep speeds.
    pub fn mean_rep_speed(&self) -> Option<f64> {
        if self.rep_speeds.is_empty() {
            return None;
        }
        Some(self.rep_speeds.iter().sum::<f64>() / self.rep_speeds.len() as f64)
    }

    /// True when the rep list length agrees with `total_reps`.
    pub fn reps_consistent(&self) -> bool {
        self.rep_speeds.len() == self.total_reps as usize
    }
}
