//! Simulated upload progress.
//!
//! The backend reports nothing while it analyzes a video, so progress is a
//! timer: the fraction climbs from 0 to a ceiling below 1.0 in fixed steps
//! and only reaches 1.0 once the upload is confirmed. The value is published
//! on a [`tokio::sync::watch`] channel for whatever renders it; it never
//! affects the request itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Timing of the simulated progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressConfig {
    /// Number of increments between 0 and the ceiling.
    pub steps: u32,
    pub step_interval: Duration,
    /// Highest fraction reached before the upload completes.
    pub ceiling: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            steps: 20,
            step_interval: Duration::from_millis(100),
            ceiling: 0.9,
        }
    }
}

/// Fraction displayed after `step` of `steps` increments.
pub fn simulated_fraction(step: u32, steps: u32, ceiling: f64) -> f64 {
    if steps == 0 {
        return ceiling;
    }
    f64::from(step.min(steps)) / f64::from(steps) * ceiling
}

/// Drive the simulated fraction from 0 to `config.ceiling`.
pub async fn run_simulation(config: ProgressConfig, sender: Arc<watch::Sender<f64>>) {
    for step in 0..=config.steps {
        sender.send_replace(simulated_fraction(step, config.steps, config.ceiling));
        if step < config.steps {
            tokio::time::sleep(config.step_interval).await;
        }
    }
}

/// Owns the progress channel for one workflow.
#[derive(Debug)]
pub struct ProgressTracker {
    config: ProgressConfig,
    sender: Arc<watch::Sender<f64>>,
}

impl ProgressTracker {
    pub fn new(config: ProgressConfig) -> Self {
        let (sender, _) = watch::channel(0.0);
        Self {
            config,
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> f64 {
        *self.sender.borrow()
    }

    /// Spawn the simulation on the current runtime, starting from 0.
    pub fn start(&self) -> SimulationHandle {
        self.sender.send_replace(0.0);
        let task = tokio::spawn(run_simulation(self.config, Arc::clone(&self.sender)));
        SimulationHandle { task }
    }

    /// Jump to 100%. Only called after a confirmed upload.
    pub fn finish(&self) {
        self.sender.send_replace(1.0);
    }

    pub fn reset(&self) {
        self.sender.send_replace(0.0);
    }
}

/// Running simulation task. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct SimulationHandle {
    task: JoinHandle<()>,
}

impl SimulationHandle {
    /// Cancel the simulation and wait until it can no longer publish.
    pub async fn stop(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> ProgressConfig {
        ProgressConfig {
            steps: 4,
            step_interval: Duration::from_millis(1),
            ceiling: 0.9,
        }
    }

    #[test]
    fn test_simulated_fraction() {
        assert_eq!(simulated_fraction(0, 20, 0.9), 0.0);
        assert!((simulated_fraction(10, 20, 0.9) - 0.45).abs() < 1e-12);
        assert!((simulated_fraction(20, 20, 0.9) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_simulated_fraction_clamps_and_handles_zero_steps() {
        assert!((simulated_fraction(25, 20, 0.9) - 0.9).abs() < 1e-12);
        assert_eq!(simulated_fraction(0, 0, 0.9), 0.9);
    }

    #[test]
    fn test_default_config() {
        let config = ProgressConfig::default();
        assert_eq!(config.steps, 20);
        assert_eq!(config.step_interval, Duration::from_millis(100));
        assert_eq!(config.ceiling, 0.9);
    }

    #[tokio::test]
    async fn test_simulation_stops_at_ceiling() {
        let tracker = ProgressTracker::new(fast_config());
        run_simulation(fast_config(), Arc::clone(&tracker.sender)).await;
        assert!((tracker.current() - 0.9).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_finish_after_stop_reports_complete() {
        let tracker = ProgressTracker::new(ProgressConfig {
            steps: 20,
            step_interval: Duration::from_secs(60),
            ceiling: 0.9,
        });
        let mut receiver = tracker.subscribe();

        let handle = tracker.start();
        handle.stop().await;
        assert!(tracker.current() < 0.9);

        tracker.finish();
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), 1.0);
    }

    #[tokio::test]
    async fn test_dropped_handle_stops_publishing() {
        let tracker = ProgressTracker::new(ProgressConfig {
            steps: 1000,
            step_interval: Duration::from_millis(1),
            ceiling: 0.9,
        });

        let handle = tracker.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let after_drop = tracker.current();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(tracker.current(), after_drop);
        assert!(after_drop < 0.9);
    }

    #[tokio::test]
    async fn test_reset() {
        let tracker = ProgressTracker::new(fast_config());
        tracker.finish();
        tracker.reset();
        assert_eq!(tracker.current(), 0.0);
    }
}
