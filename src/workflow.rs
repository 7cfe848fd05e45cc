//! Analysis workflow: select → configure → upload → metrics → results.
//!
//! [`AnalysisWorkflow`] is the only owner of the [`WorkoutSession`]. Every
//! asynchronous step returns before the session is touched, so the session is
//! never observed half-updated.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::watch;

use crate::acquisition::{AcquisitionError, VideoAcquirer};
use crate::client::{MetricsClient, MetricsOutcome, UploadClient, UploadError};
use crate::config::BackendConfig;
use crate::models::{LiftType, PlateSize, VideoRef, WorkoutSession};
use crate::progress::ProgressTracker;
use crate::traits::{HttpClient, MediaSource};

/// Result of a successful submit.
#[derive(Debug)]
pub struct SubmissionReport {
    pub processed_video: VideoRef,
    pub metrics: MetricsOutcome,
}

/// Single-owner coordinator for one user's analysis attempts.
pub struct AnalysisWorkflow<C: HttpClient> {
    config: BackendConfig,
    session: WorkoutSession,
    acquirer: VideoAcquirer,
    upload: UploadClient<C>,
    metrics: MetricsClient<C>,
    progress: ProgressTracker,
}

impl<C: HttpClient> AnalysisWorkflow<C> {
    pub fn new(config: BackendConfig, http: Arc<C>) -> Self {
        Self {
            acquirer: VideoAcquirer::new(&config.work_dir),
            upload: UploadClient::new(Arc::clone(&http), &config.base_url, &config.work_dir),
            metrics: MetricsClient::new(http, &config.base_url),
            progress: ProgressTracker::new(config.progress),
            session: WorkoutSession::new(),
            config,
        }
    }

    /// Replace the acquirer, e.g. to change the size limit.
    pub fn with_acquirer(mut self, acquirer: VideoAcquirer) -> Self {
        self.acquirer = acquirer;
        self
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    /// Receiver for the simulated progress fraction.
    pub fn progress(&self) -> watch::Receiver<f64> {
        self.progress.subscribe()
    }

    /// Acquire a new input video.
    ///
    /// On success the previous processed video and metrics are cleared. On
    /// failure the session is left exactly as it was.
    pub async fn import_video(&mut self, source: &dyn MediaSource) -> Result<VideoRef, AcquisitionError> {
        let video = self.acquirer.acquire(source).await?;
        self.session.select_video(video.clone());
        self.progress.reset();
        Ok(video)
    }

    pub fn configure(&mut self, lift_type: LiftType, weight: impl Into<String>, plate_size: PlateSize) {
        self.session.configure(lift_type, weight, plate_size);
    }

    /// Upload the selected video, then fetch its metrics.
    ///
    /// One attempt, no retry. `busy` is set for the duration and cleared on
    /// every path, including when this future is dropped mid-upload. Results
    /// are written to the session only after the upload succeeded; a metrics
    /// failure does not fail the submission.
    pub async fn submit(&mut self) -> Result<SubmissionReport, UploadError> {
        if self.session.video.is_none() {
            return Err(UploadError::NoVideo);
        }
        if self.session.busy {
            return Err(UploadError::Busy);
        }

        let mut session = UploadGuard::begin(&mut self.session);
        let simulation = self.progress.start();
        let result = self.upload.submit(&session).await;
        simulation.stop().await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Submission failed: {}", e);
                return Err(e);
            }
        };

        let metrics = self
            .metrics
            .resolve(outcome.metrics_path.as_deref(), self.config.metrics_fallback)
            .await;

        session.apply_results(outcome.processed_video.clone(), metrics.metrics().cloned());
        drop(session);
        self.progress.finish();

        Ok(SubmissionReport {
            processed_video: outcome.processed_video,
            metrics,
        })
    }

    /// Results were seen; start over with an empty session.
    pub fn acknowledge(&mut self) {
        self.session.reset();
        self.progress.reset();
    }
}

/// Holds the session busy for one upload and clears the flag on drop.
struct UploadGuard<'a> {
    session: &'a mut WorkoutSession,
}

impl<'a> UploadGuard<'a> {
    fn begin(session: &'a mut WorkoutSession) -> Self {
        session.begin_upload();
        Self { session }
    }
}

impl Deref for UploadGuard<'_> {
    type Target = WorkoutSession;

    fn deref(&self) -> &WorkoutSession {
        self.session
    }
}

impl DerefMut for UploadGuard<'_> {
    fn deref_mut(&mut self) -> &mut WorkoutSession {
        self.session
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.session.finish_upload();
    }
}
