use serde::{Deserialize, Serialize};

/// Invalid configuration values.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be finite and positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be non-negative (got {value})")]
    Negative { name: &'static str, value: i32 },
    #[error("row spacing window is empty (min {min_px}px > max {max_px}px)")]
    EmptySpacingWindow { min_px: i32, max_px: i32 },
}

/// Camera and target constants used for heading calibration and distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    /// Calibrated focal length in pixels.
    pub focal_length_px: f64,
    /// Field of view the raw angle is rescaled into, in degrees.
    pub max_angle_deg: f64,
    /// Real-world span used for the pinhole distance estimate, in centimeters.
    pub tag_size_cm: f64,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            focal_length_px: 2900.0,
            max_angle_deg: 290.0,
            tag_size_cm: 2.5,
        }
    }
}

/// Horizontal spacing window that keeps consecutive markers in one row.
///
/// Both bounds are inclusive, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowGroupingParams {
    pub min_spacing_px: i32,
    pub max_spacing_px: i32,
}

impl Default for RowGroupingParams {
    fn default() -> Self {
        Self {
            min_spacing_px: 10,
            max_spacing_px: 200,
        }
    }
}

impl RowGroupingParams {
    /// Whether a horizontal gap keeps two markers in the same row.
    #[inline]
    pub fn accepts(&self, distance_x: i64) -> bool {
        (i64::from(self.min_spacing_px)..=i64::from(self.max_spacing_px)).contains(&distance_x)
    }
}

/// Fixed pixel offsets used by the row geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Vertical padding added above and below a row's bounding box.
    pub bbox_padding_px: i32,
    /// Distance of the reference point above the bottom frame edge.
    pub reference_margin_px: i32,
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            bbox_padding_px: 20,
            reference_margin_px: 10,
        }
    }
}

/// How the single per-frame heading is chosen when several rows are visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingPolicy {
    /// Heading of the last row in grouping order.
    #[default]
    LastRow,
    /// Heading of the row with the smallest defined distance.
    NearestRow,
    /// Mean heading over all rows.
    MeanHeading,
}

/// Full navigation configuration, fixed at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavParams {
    pub camera: CameraParams,
    pub grouping: RowGroupingParams,
    pub geometry: GeometryParams,
    pub heading_policy: HeadingPolicy,
}

impl NavParams {
    /// Check every value the pipeline divides by or compares against.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("camera.focal_length_px", self.camera.focal_length_px),
            ("camera.max_angle_deg", self.camera.max_angle_deg),
            ("camera.tag_size_cm", self.camera.tag_size_cm),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParamsError::NotPositive { name, value });
            }
        }

        let non_negative = [
            ("grouping.min_spacing_px", self.grouping.min_spacing_px),
            ("geometry.bbox_padding_px", self.geometry.bbox_padding_px),
            ("geometry.reference_margin_px", self.geometry.reference_margin_px),
        ];
        for (name, value) in non_negative {
            if value < 0 {
                return Err(ParamsError::Negative { name, value });
            }
        }

        if self.grouping.min_spacing_px > self.grouping.max_spacing_px {
            return Err(ParamsError::EmptySpacingWindow {
                min_px: self.grouping.min_spacing_px,
                max_px: self.grouping.max_spacing_px,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gate_setup() {
        let p = NavParams::default();
        assert_eq!(p.camera.focal_length_px, 2900.0);
        assert_eq!(p.camera.max_angle_deg, 290.0);
        assert_eq!(p.camera.tag_size_cm, 2.5);
        assert_eq!(p.grouping.min_spacing_px, 10);
        assert_eq!(p.grouping.max_spacing_px, 200);
        assert_eq!(p.geometry.bbox_padding_px, 20);
        assert_eq!(p.geometry.reference_margin_px, 10);
        assert_eq!(p.heading_policy, HeadingPolicy::LastRow);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn spacing_window_is_inclusive() {
        let g = RowGroupingParams::default();
        assert!(!g.accepts(9));
        assert!(g.accepts(10));
        assert!(g.accepts(200));
        assert!(!g.accepts(201));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let raw = r#"{"camera":{"tag_size_cm":5.0},"heading_policy":"nearest_row"}"#;
        let p: NavParams = serde_json::from_str(raw).expect("parse params");
        assert_eq!(p.camera.tag_size_cm, 5.0);
        assert_eq!(p.camera.focal_length_px, 2900.0);
        assert_eq!(p.grouping, RowGroupingParams::default());
        assert_eq!(p.heading_policy, HeadingPolicy::NearestRow);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut p = NavParams::default();
        p.camera.focal_length_px = 0.0;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::NotPositive {
                name: "camera.focal_length_px",
                ..
            })
        ));

        let mut p = NavParams::default();
        p.camera.tag_size_cm = f64::NAN;
        assert!(p.validate().is_err());

        let mut p = NavParams::default();
        p.grouping.min_spacing_px = 300;
        assert_eq!(
            p.validate(),
            Err(ParamsError::EmptySpacingWindow {
                min_px: 300,
                max_px: 200
            })
        );

        let mut p = NavParams::default();
        p.geometry.bbox_padding_px = -1;
        assert!(matches!(p.validate(), Err(ParamsError::Negative { .. })));
    }
}
