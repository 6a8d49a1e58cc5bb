//! Core types for marker-row navigation.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector or image type: detector output
//! enters as [`MarkerObservation`]s and everything downstream is a
//! frame-scoped value type.

mod frame;
mod logger;
mod marker;
mod params;
mod result;
mod row;

pub use frame::{FrameGeometry, FrameGeometryError};
pub use marker::{MarkerObservation, MarkerSample};
pub use params::{
    CameraParams, GeometryParams, HeadingPolicy, NavParams, ParamsError, RowGroupingParams,
};
pub use result::{BoundingBox, FrameResult, RowMetrics};
pub use row::{Row, RowError, MARKERS_PER_ROW};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
