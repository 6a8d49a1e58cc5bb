//! Text annotations for a processed frame.
//!
//! Mirrors the labels of the camera overlay: the heading on its own line and,
//! per row, the spacing between the outer markers and the distance estimate.

use std::fmt::Write;

use marker_nav::{FrameResult, RowMetrics};

pub fn heading_label(result: &FrameResult) -> String {
    format!("Angle: {:+.1} deg", result.heading_deg)
}

pub fn row_label(row: &RowMetrics) -> String {
    let mut out = format!("Spacing: {}px", row.spacing_px);
    if let Some(d) = row.distance_cm {
        let _ = write!(out, "  Dist: {d:.2} cm");
    }
    out
}

/// All lines printed for one frame.
pub fn frame_lines(index: usize, result: &FrameResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(format!("frame {index}: {}", heading_label(result)));
    for row in &result.rows {
        lines.push(format!(
            "  row {:?} center=({}, {}) {}",
            row.marker_ids,
            row.center.x,
            row.center.y,
            row_label(row)
        ));
    }
    lines
}
