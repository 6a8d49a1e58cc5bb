//! Row geometry: bounding box, diagonal center, heading and distance.

use log::debug;
use marker_nav_core::{BoundingBox, CameraParams, FrameGeometry, GeometryParams, Row, RowMetrics};
use nalgebra::Point2;

/// Computes [`RowMetrics`] for rows using fixed camera constants.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometryEstimator {
    camera: CameraParams,
    geometry: GeometryParams,
}

impl GeometryEstimator {
    pub fn new(camera: CameraParams, geometry: GeometryParams) -> Self {
        Self { camera, geometry }
    }

    #[inline]
    pub fn camera(&self) -> &CameraParams {
        &self.camera
    }

    #[inline]
    pub fn geometry(&self) -> &GeometryParams {
        &self.geometry
    }

    /// Padded bounding box of the row's member centroids.
    pub fn bounding_box(&self, row: &Row) -> BoundingBox {
        let first = row.first();
        let init = (first.x(), first.x(), first.y(), first.y());
        let (x_min, x_max, y_min, y_max) = row.iter().fold(init, |(x0, x1, y0, y1), s| {
            (x0.min(s.x()), x1.max(s.x()), y0.min(s.y()), y1.max(s.y()))
        });
        let pad = self.geometry.bbox_padding_px;
        BoundingBox {
            x_min,
            x_max,
            y_min: y_min.saturating_sub(pad),
            y_max: y_max.saturating_add(pad),
        }
    }

    /// Metrics for one row seen in `frame`.
    pub fn estimate(&self, row: &Row, frame: &FrameGeometry) -> RowMetrics {
        let bbox = self.bounding_box(row);
        let center = bbox.diagonal_center();
        let angle = raw_angle_deg(center, frame.reference_point());
        let heading_deg = calibrate_heading(angle, frame.half_width(), self.camera.max_angle_deg);
        let pixel_width = bbox.width();
        let distance_cm = estimate_distance(
            pixel_width,
            self.camera.tag_size_cm,
            self.camera.focal_length_px,
        );

        debug!(
            "row {:?}: center=({}, {}) heading={:+.2}deg width={}px distance={:?}",
            row.ids(),
            center.x,
            center.y,
            heading_deg,
            pixel_width,
            distance_cm
        );

        RowMetrics {
            marker_ids: row.ids(),
            bbox,
            center,
            heading_deg,
            distance_cm,
            spacing_px: pixel_width,
        }
    }
}

/// Angle from `reference` to `target` in degrees.
///
/// Zero points straight up the image; targets to the left are negative and
/// targets to the right positive, in `(-180, 180]`.
pub fn raw_angle_deg(target: Point2<i32>, reference: Point2<i32>) -> f64 {
    let dx = f64::from(target.x) - f64::from(reference.x);
    let dy = f64::from(reference.y) - f64::from(target.y);
    dx.atan2(dy).to_degrees()
}

/// Linear field-of-view calibration of a raw angle.
///
/// The raw angle is divided by half the frame width and scaled by half the
/// configured maximum angle. This is an approximation, not a lens model.
#[inline]
pub fn calibrate_heading(raw_angle_deg: f64, half_width_px: f64, max_angle_deg: f64) -> f64 {
    (raw_angle_deg / half_width_px) * (max_angle_deg / 2.0)
}

/// Pinhole distance from the apparent pixel width of a known span.
///
/// Returns `None` when `pixel_width <= 0`.
#[inline]
pub fn estimate_distance(
    pixel_width: i32,
    tag_size_cm: f64,
    focal_length_px: f64,
) -> Option<f64> {
    (pixel_width > 0).then(|| tag_size_cm * focal_length_px / pixel_width as f64)
}
