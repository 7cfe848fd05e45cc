//! Lift metadata chosen before an upload: the lift type and the plate size
//! used by the backend for pixel-to-meter calibration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a lift type or plate size cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLiftError {
    #[error("unknown lift type '{0}' (expected squat, bench or deadlift)")]
    UnknownLift(String),

    #[error("unknown plate size '{0}' (expected 45, 35 or 25)")]
    UnknownPlate(String),
}

/// The barbell lift being analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LiftType {
    #[default]
    Squat,
    BenchPress,
    Deadlift,
}

impl LiftType {
    pub const ALL: [LiftType; 3] = [LiftType::Squat, LiftType::BenchPress, LiftType::Deadlift];

    /// Display label shown in headers ("Bench Press").
    pub fn label(&self) -> &'static str {
        match self {
            LiftType::Squat => "Squat",
            LiftType::BenchPress => "Bench Press",
            LiftType::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for LiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LiftType {
    type Err = ParseLiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squat" => Ok(LiftType::Squat),
            "bench" | "bench-press" | "bench_press" | "benchpress" | "bench press" => {
                Ok(LiftType::BenchPress)
            }
            "deadlift" => Ok(LiftType::Deadlift),
            _ => Err(ParseLiftError::UnknownLift(s.to_string())),
        }
    }
}

/// Plate size visible in the video, used as the calibration reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlateSize {
    #[default]
    Olympic45,
    Standard35,
    Small25,
}

impl PlateSize {
    pub const ALL: [PlateSize; 3] = [PlateSize::Olympic45, PlateSize::Standard35, PlateSize::Small25];

    /// Real-world plate diameter in meters.
    pub fn diameter_m(&self) -> f64 {
        match self {
            PlateSize::Olympic45 => 0.45,
            PlateSize::Standard35 => 0.35,
            PlateSize::Small25 => 0.25,
        }
    }

    /// Decimal text sent in the `plate_diameter` form field.
    pub fn diameter_text(&self) -> String {
        self.diameter_m().to_string()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlateSize::Olympic45 => "45cm (Olympic)",
            PlateSize::Standard35 => "35cm (Standard)",
            PlateSize::Small25 => "25cm (Small)",
        }
    }
}

impl fmt::Display for PlateSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlateSize {
    type Err = ParseLiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.trim_end_matches("cm") {
            "45" => Ok(PlateSize::Olympic45),
            "35" => Ok(PlateSize::Standard35),
            "25" => Ok(PlateSize::Small25),
            _ => Err(ParseLiftError::UnknownPlate(s.to_string())),
        }
    }
}
