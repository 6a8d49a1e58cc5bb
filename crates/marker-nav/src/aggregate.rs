use marker_nav_core::{FrameGeometry, FrameResult, HeadingPolicy, Row, RowMetrics};

use crate::GeometryEstimator;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Estimate every row in order and pick the frame's reported heading.
///
/// With no rows the heading is `0.0` and the metrics list is empty.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(rows, estimator, frame), fields(rows = rows.len()))
)]
pub fn aggregate(
    rows: &[Row],
    estimator: &GeometryEstimator,
    frame: &FrameGeometry,
    policy: HeadingPolicy,
) -> FrameResult {
    let metrics: Vec<RowMetrics> = rows.iter().map(|r| estimator.estimate(r, frame)).collect();
    FrameResult {
        heading_deg: select_heading(&metrics, policy),
        reference_point: frame.reference_point(),
        rows: metrics,
    }
}

/// Reduce per-row headings to the single heading handed to the controller.
///
/// `LastRow` takes the heading of the last entry. `NearestRow` takes the row
/// with the smallest defined distance (first on ties) and falls back to
/// `LastRow` when no distance is defined. `MeanHeading` averages all rows.
pub fn select_heading(metrics: &[RowMetrics], policy: HeadingPolicy) -> f64 {
    let last = metrics.last().map_or(0.0, |m| m.heading_deg);
    match policy {
        HeadingPolicy::LastRow => last,
        HeadingPolicy::NearestRow => metrics
            .iter()
            .filter_map(|m| m.distance_cm.map(|d| (d, m.heading_deg)))
            .fold(None, |best: Option<(f64, f64)>, cur| match best {
                Some(b) if b.0 <= cur.0 => Some(b),
                _ => Some(cur),
            })
            .map_or(last, |(_, heading)| heading),
        HeadingPolicy::MeanHeading => {
            if metrics.is_empty() {
                0.0
            } else {
                metrics.iter().map(|m| m.heading_deg).sum::<f64>() / metrics.len() as f64
            }
        }
    }
}
