use nalgebra::Point2;
use serde::Serialize;

use crate::MARKERS_PER_ROW;

/// Padded pixel bounding box of a row.
///
/// `x_min`/`x_max` are the extreme member centroids; the y bounds include the
/// vertical padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Horizontal extent in pixels, saturating at `i32::MAX`.
    #[inline]
    pub fn width(&self) -> i32 {
        self.x_max.saturating_sub(self.x_min)
    }

    /// Center of the box diagonal, truncated to whole pixels.
    #[inline]
    pub fn diagonal_center(&self) -> Point2<i32> {
        Point2::new(midpoint(self.x_min, self.x_max), midpoint(self.y_min, self.y_max))
    }
}

/// Truncating midpoint; the sum is taken in i64 so it cannot overflow.
#[inline]
fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) / 2) as i32
}

/// Derived geometry for one row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowMetrics {
    pub marker_ids: [u32; MARKERS_PER_ROW],
    pub bbox: BoundingBox,
    pub center: Point2<i32>,
    /// Calibrated heading in degrees; negative is left of the reference point.
    pub heading_deg: f64,
    /// Pinhole distance estimate; `None` for rows with no horizontal extent.
    pub distance_cm: Option<f64>,
    /// Pixel span between the outermost markers.
    pub spacing_px: i32,
}

/// Everything the core reports for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameResult {
    /// Heading to hand to the navigation controller; `0.0` without rows.
    pub heading_deg: f64,
    pub reference_point: Point2<i32>,
    pub rows: Vec<RowMetrics>,
}

impl FrameResult {
    /// Result for a frame in which no valid row was found.
    pub fn empty(reference_point: Point2<i32>) -> Self {
        Self {
            heading_deg: 0.0,
            reference_point,
            rows: Vec::new(),
        }
    }

    #[inline]
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}
