//! Domain types shared by the upload workflow and the presentation layer.

pub mod lift;
pub mod metrics;
pub mod session;

pub use lift::{LiftType, ParseLiftError, PlateSize};
pub use metrics::SessionMetrics;
pub use session::{VideoRef, WorkoutSession};
