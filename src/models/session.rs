//! Workout session state for a single analysis attempt.
//!
//! A [`WorkoutSession`] is owned by exactly one orchestrator
//! (see [`crate::workflow::AnalysisWorkflow`]) and only mutated after each
//! asynchronous step completes.

use std::fmt;
use std::path::{Path, PathBuf};

use super::lift::{LiftType, PlateSize};
use super::metrics::SessionMetrics;

/// Handle to a video file on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef(PathBuf);

impl VideoRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// User selections and results for one analysis attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutSession {
    /// Private copy of the selected input video.
    pub video: Option<VideoRef>,
    pub lift_type: LiftType,
    /// Free-form weight as typed by the user.
    pub weight: String,
    pub plate_size: PlateSize,
    /// Annotated video returned by the backend.
    pub processed_video: Option<VideoRef>,
    pub metrics: Option<SessionMetrics>,
    /// True only while an upload is in flight.
    pub busy: bool,
}

impl WorkoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a newly acquired input video.
    ///
    /// New input invalidates any previous results.
    pub fn select_video(&mut self, video: VideoRef) {
        self.video = Some(video);
        self.processed_video = None;
        self.metrics = None;
    }

    pub fn configure(&mut self, lift_type: LiftType, weight: impl Into<String>, plate_size: PlateSize) {
        self.lift_type = lift_type;
        self.weight = weight.into();
        self.plate_size = plate_size;
    }

    /// Whether a submit action is currently allowed.
    pub fn can_submit(&self) -> bool {
        self.video.is_some() && !self.busy
    }

    pub fn begin_upload(&mut self) {
        self.busy = true;
    }

    pub fn finish_upload(&mut self) {
        self.busy = false;
    }

    /// Record the results of a successful upload.
    pub fn apply_results(&mut self, processed_video: VideoRef, metrics: Option<SessionMetrics>) {
        self.processed_video = Some(processed_video);
        self.metrics = metrics;
    }

    /// Return every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Header line such as "Deadlift - 100kg".
    pub fn title(&self) -> String {
        format!("{} - {}kg", self.lift_type.label(), self.weight)
    }
}
