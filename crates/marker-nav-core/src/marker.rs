use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One marker as reported by a marker detector.
///
/// Corners are in pixel coordinates (origin top-left, y down), in the
/// detector's native order. Only their mean is used downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    /// Decoded marker identifier.
    pub id: u32,
    /// The four corners of the marker quad.
    pub corners: [Point2<f32>; 4],
}

impl MarkerObservation {
    /// Mean of the four corners, in sub-pixel precision.
    pub fn centroid(&self) -> Point2<f32> {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2::new(sx / 4.0, sy / 4.0)
    }

    /// Reduce the observation to the per-frame sample used for grouping.
    pub fn to_sample(&self) -> MarkerSample {
        MarkerSample::from(self)
    }
}

/// A detected marker's identifier and integer centroid for the current frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MarkerSample {
    pub id: u32,
    /// Centroid in whole pixels.
    pub position: Point2<i32>,
}

impl MarkerSample {
    pub fn new(id: u32, x: i32, y: i32) -> Self {
        Self {
            id,
            position: Point2::new(x, y),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.position.y
    }
}

impl From<&MarkerObservation> for MarkerSample {
    /// Truncates the centroid toward zero.
    fn from(obs: &MarkerObservation) -> Self {
        let c = obs.centroid();
        MarkerSample::new(obs.id, c.x as i32, c.y as i32)
    }
}
