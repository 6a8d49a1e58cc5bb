//! Heading and distance estimation from rows of fiducial markers.
//!
//! The per-frame pipeline is:
//!
//! 1. a [`MarkerDetector`] reports marker ids and corner quads,
//! 2. [`RowGrouper`] sorts the marker centroids by x and clusters them into
//!    rows of exactly four,
//! 3. [`GeometryEstimator`] turns each row into a bounding box, a diagonal
//!    center, a calibrated heading and a pinhole distance estimate,
//! 4. [`aggregate`] collects the per-row metrics and picks the single heading
//!    reported for the frame.
//!
//! [`MarkerNavigator`] wires these together around a detector that is built
//! once and reused for every frame.
//!
//! ## Quickstart
//!
//! ```
//! use marker_nav::{FrameGeometry, MarkerNavigator, MarkerSample, NavParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = NavParams::default();
//! let frame = FrameGeometry::new(640, 480, params.geometry.reference_margin_px)?;
//! let samples = [100, 150, 200, 250].map(|x| MarkerSample::new(x as u32, x, 300));
//!
//! let result = MarkerNavigator::without_detector(params)?.process_samples(&samples, &frame);
//! assert_eq!(result.rows.len(), 1);
//! println!("heading {:+.1} deg", result.heading_deg);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod detector;
mod error;
mod geometry;
mod grouping;
mod navigator;

pub use marker_nav_core as core;
pub use marker_nav_core::{
    BoundingBox, CameraParams, FrameGeometry, FrameGeometryError, FrameResult, GeometryParams,
    HeadingPolicy, MarkerObservation, MarkerSample, NavParams, ParamsError, Row, RowError,
    RowGroupingParams, RowMetrics, MARKERS_PER_ROW,
};

pub use aggregate::{aggregate, select_heading};
pub use detector::{MarkerDetector, NoDetector};
pub use error::NavError;
pub use geometry::{calibrate_heading, estimate_distance, raw_angle_deg, GeometryEstimator};
pub use grouping::{group_rows, RowGrouper};
pub use navigator::MarkerNavigator;
