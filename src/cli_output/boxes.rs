//! Headers, step lines, progress line and report printing.

use std::io::{self, Write};

/// Line width for separators.
pub const LINE_WIDTH: usize = 60;

/// Width of the progress bar inside the progress line.
const PROGRESS_BAR_WIDTH: usize = 20;

/// Print the main header.
///
/// ```text
/// SPEEDFIT ANALYSIS
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    eprintln!();
    eprintln!("{}", title);
    eprintln!("{}", "═".repeat(LINE_WIDTH));
    eprintln!();
}

/// Print the start of a step.
///
/// ```text
/// STEP 2/3: UPLOAD
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_step_start(step: u8, total: u8, title: &str) {
    eprintln!("STEP {}/{}: {}", step, total, title);
    eprintln!("{}", "─".repeat(LINE_WIDTH));
}

/// Print a line within a step.
///
/// ```text
///   ✓ Video imported
/// ```
pub fn print_step_line(icon: &str, message: &str) {
    eprintln!("  {} {}", icon, message);
}

/// Print the end of a step (just a blank line).
pub fn print_step_end() {
    eprintln!();
}

/// Whole percent shown for a progress fraction, truncated like the ring
/// label ("45%").
pub fn progress_percent(fraction: f64) -> u32 {
    if !fraction.is_finite() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0) as u32
}

/// Text bar for a progress fraction.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let percent = progress_percent(fraction) as usize;
    let filled = (percent * width / 100).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Progress line content without the carriage return.
pub fn format_progress_line(spinner_char: char, fraction: f64, message: &str) -> String {
    format!(
        "  {} {} [{}] {:>3}%",
        spinner_char,
        message,
        progress_bar(fraction, PROGRESS_BAR_WIDTH),
        progress_percent(fraction)
    )
}

/// Print the progress line (overwrites the current line).
pub fn print_progress(spinner_char: char, fraction: f64, message: &str) {
    let mut stderr = io::stderr();
    let _ = write!(stderr, "\r{}", format_progress_line(spinner_char, fraction, message));
    stderr.flush().ok();
}

/// Clear the progress line and print a final status line.
pub fn print_progress_done(icon: &str, message: &str) {
    eprint!("\r{}\r", " ".repeat(LINE_WIDTH + 10));
    print_step_line(icon, message);
}

/// Print troubleshooting lines.
pub fn print_troubleshoot(lines: &[&str]) {
    eprintln!();
    for line in lines {
        eprintln!("    {}", line);
    }
}

/// Print report lines to stdout.
pub fn print_report(lines: &[String]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        let _ = writeln!(out, "{}", line);
    }
    let _ = out.flush();
}

/// Print the success footer.
///
/// ```text
/// ════════════════════════════════════════════════════════════
/// ✓ ANALYSIS COMPLETE
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_footer_success(title: &str) {
    eprintln!("{}", "═".repeat(LINE_WIDTH));
    eprintln!("{} {}", icons::SUCCESS, title);
    eprintln!("{}", "═".repeat(LINE_WIDTH));
}

/// Print the warning footer (partial success).
pub fn print_footer_warning(title: &str, detail: &str) {
    eprintln!("{}", "═".repeat(LINE_WIDTH));
    eprintln!("{} {}", icons::WARNING, title);
    eprintln!();
    eprintln!("  {}", detail);
    eprintln!("{}", "═".repeat(LINE_WIDTH));
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}

/// Spinner characters for loading animation.
pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_truncates() {
        assert_eq!(progress_percent(0.0), 0);
        assert_eq!(progress_percent(0.459), 45);
        assert_eq!(progress_percent(0.9), 90);
        assert_eq!(progress_percent(1.0), 100);
    }

    #[test]
    fn test_progress_percent_clamps() {
        assert_eq!(progress_percent(-0.5), 0);
        assert_eq!(progress_percent(1.7), 100);
        assert_eq!(progress_percent(f64::NAN), 0);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 10), "░░░░░░░░░░");
        assert_eq!(progress_bar(0.5, 10), "█████░░░░░");
        assert_eq!(progress_bar(1.0, 10), "██████████");
    }

    #[test]
    fn test_progress_line() {
        let line = format_progress_line('⠋', 0.45, "Analyzing");
        assert!(line.starts_with("  ⠋ Analyzing ["));
        assert!(line.ends_with(" 45%"));
    }
}
