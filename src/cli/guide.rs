//! Camera setup guidance shown before recording a lift.

use crate::cli_output::{print_header, print_step_end};
use crate::models::PlateSize;

/// Recording tips for accurate speed detection.
pub const CAMERA_TIPS: [&str; 5] = [
    "Position camera 90° to the side of the bar",
    "Keep camera steady and at barbell height",
    "Ensure the selected plate size is clearly visible",
    "Maintain consistent distance from the bar",
    "Good lighting on the plates is essential",
];

/// Lines of the guide, without the header.
pub fn guide_lines() -> Vec<String> {
    let mut lines = vec!["For accurate speed detection:".to_string(), String::new()];
    lines.extend(CAMERA_TIPS.iter().map(|tip| format!("  • {}", tip)));
    lines.push(String::new());
    lines.push("Plate sizes (--plate):".to_string());
    lines.extend(
        PlateSize::ALL
            .iter()
            .map(|plate| format!("  {:<18}{} m", plate.label(), plate.diameter_text())),
    );
    lines
}

/// Handle `speedfit guide`.
pub fn handle_guide_command() {
    print_header("CAMERA SETUP GUIDE");
    for line in guide_lines() {
        println!("{}", line);
    }
    print_step_end();
}
