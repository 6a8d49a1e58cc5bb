use nalgebra::Point2;
use serde::Serialize;

/// Invalid frame dimensions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameGeometryError {
    #[error("frame dimensions must be non-zero (width={width}, height={height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("frame dimensions exceed the i32 pixel range (width={width}, height={height})")]
    TooLarge { width: u32, height: u32 },
}

/// Pixel dimensions of a frame plus the reference point headings are measured from.
///
/// The reference point stands for the vehicle's forward-looking position in
/// image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrameGeometry {
    width: u32,
    height: u32,
    reference: Point2<i32>,
}

impl FrameGeometry {
    /// Frame with the reference point at the bottom center, lifted by
    /// `reference_margin_px` rows: `(width / 2, height - margin)`.
    pub fn new(
        width: u32,
        height: u32,
        reference_margin_px: i32,
    ) -> Result<Self, FrameGeometryError> {
        if width == 0 || height == 0 {
            return Err(FrameGeometryError::EmptyFrame { width, height });
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(FrameGeometryError::TooLarge { width, height });
        };
        let reference = Point2::new(w / 2, h.saturating_sub(reference_margin_px));
        Ok(Self {
            width,
            height,
            reference,
        })
    }

    /// Override the reference point.
    pub fn with_reference_point(mut self, reference: Point2<i32>) -> Self {
        self.reference = reference;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn reference_point(&self) -> Point2<i32> {
        self.reference
    }

    /// Half the frame width in pixels, as used by the heading calibration.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }
}
