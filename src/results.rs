//! Results presentation.
//!
//! Turns a session and its metrics into display values and a plain-text
//! report. Tolerates a null session average and any number of reps,
//! including none.

use crate::models::{SessionMetrics, WorkoutSession};

/// Width of the per-rep bar chart in characters.
pub const CHART_WIDTH: usize = 30;

const LINE_WIDTH: usize = 60;
const BAR_CHAR: char = '█';

/// One row of the per-rep list.
#[derive(Debug, Clone, PartialEq)]
pub struct RepRow {
    /// 1-based rep number.
    pub number: usize,
    pub speed: f64,
    /// Bar length relative to the best rep.
    pub bar_len: usize,
}

/// Display values for the results screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub title: String,
    pub load: String,
    pub reps: u32,
    /// Session average, or 0.0 when the backend sent null.
    pub average: f64,
    /// Best rep speed, or 0.0 when there are no reps.
    pub best: f64,
    pub rows: Vec<RepRow>,
    pub calibration_used: bool,
    pub pixels_per_meter: f64,
}

impl ResultsSummary {
    pub fn new(session: &WorkoutSession, metrics: &SessionMetrics) -> Self {
        let best = metrics.best_rep_speed().unwrap_or(0.0);
        let rows = metrics
            .rep_speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| RepRow {
                number: i + 1,
                speed,
                bar_len: bar_length(speed, best, CHART_WIDTH),
            })
            .collect();

        Self {
            title: session.title(),
            load: session.weight.clone(),
            reps: metrics.total_reps,
            average: metrics.session_average.unwrap_or(0.0),
            best,
            rows,
            calibration_used: metrics.calibration_used,
            pixels_per_meter: metrics.pixels_per_meter,
        }
    }

    pub fn average_display(&self) -> String {
        format_velocity(self.average)
    }

    pub fn best_display(&self) -> String {
        format_velocity(self.best)
    }

    /// Plain-text report, one entry per line.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            self.title.clone(),
            "═".repeat(LINE_WIDTH),
            format!("  {:<10}{}", "LOAD", self.load),
            format!("  {:<10}{}", "REPS", self.reps),
            format!("  {:<10}{} m/s", "VELOCITY", self.average_display()),
            String::new(),
            "Mean velocity".to_string(),
            "─".repeat(LINE_WIDTH),
            format!("  {:<10}{} m/s", "Best", self.best_display()),
            format!("  {:<10}{} m/s", "Average", self.average_display()),
            String::new(),
        ];

        if self.rows.is_empty() {
            lines.push("No reps detected.".to_string());
        } else {
            lines.push("Individual Reps".to_string());
            lines.push("─".repeat(LINE_WIDTH));
            for row in &self.rows {
                lines.push(format!(
                    "  Rep {:<3} {} m/s  {}",
                    format!("{}:", row.number),
                    format_velocity(row.speed),
                    BAR_CHAR.to_string().repeat(row.bar_len)
                ));
            }
        }

        lines.push(String::new());
        lines.push(calibration_line(self.calibration_used, self.pixels_per_meter));
        lines
    }
}

/// Two-decimal velocity text ("1.80").
pub fn format_velocity(value: f64) -> String {
    format!("{:.2}", value)
}

/// Bar length for `speed` scaled so `best` fills `width`.
///
/// Zero when `best` is not positive, so an all-zero session never divides
/// by zero.
pub fn bar_length(speed: f64, best: f64, width: usize) -> usize {
    if best.is_nan() || best <= 0.0 || !speed.is_finite() || speed <= 0.0 {
        return 0;
    }
    let scaled = (speed / best * width as f64).round();
    (scaled as usize).min(width)
}

fn calibration_line(calibration_used: bool, pixels_per_meter: f64) -> String {
    if calibration_used {
        format!("Calibration: plate detected ({:.1} px/m)", pixels_per_meter)
    } else {
        "Calibration: plate not detected, velocities are estimates".to_string()
    }
}

/// Report for a finished session, with or without metrics.
pub fn render_session(session: &WorkoutSession) -> Vec<String> {
    let mut lines = match &session.metrics {
        Some(metrics) => ResultsSummary::new(session, metrics).render(),
        None => vec![
            session.title(),
            "═".repeat(LINE_WIDTH),
            "No metrics available for this video.".to_string(),
        ],
    };

    if let Some(ref video) = session.processed_video {
        lines.push(format!("Processed video: {}", video));
    }
    lines
}
