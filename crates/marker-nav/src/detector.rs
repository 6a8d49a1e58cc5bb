use std::convert::Infallible;

use marker_nav_core::MarkerObservation;

/// Source of marker observations for one frame.
///
/// Implementations wrap whatever decodes fiducials from an image (an ArUco
/// dictionary, a recorded stream, a simulator). A detector is built once and
/// reused for every frame, so any per-dictionary setup belongs in its
/// constructor.
pub trait MarkerDetector<F: ?Sized> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Detect all markers visible in `frame`.
    fn detect(&mut self, frame: &F) -> Result<Vec<MarkerObservation>, Self::Error>;
}

/// Placeholder detector for callers that feed observations directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDetector;

impl<F: ?Sized> MarkerDetector<F> for NoDetector {
    type Error = Infallible;

    fn detect(&mut self, _frame: &F) -> Result<Vec<MarkerObservation>, Self::Error> {
        Ok(Vec::new())
    }
}

impl<F: ?Sized, D: MarkerDetector<F> + ?Sized> MarkerDetector<F> for Box<D> {
    type Error = D::Error;

    fn detect(&mut self, frame: &F) -> Result<Vec<MarkerObservation>, Self::Error> {
        (**self).detect(frame)
    }
}

impl<F: ?Sized, D: MarkerDetector<F> + ?Sized> MarkerDetector<F> for &mut D {
    type Error = D::Error;

    fn detect(&mut self, frame: &F) -> Result<Vec<MarkerObservation>, Self::Error> {
        (**self).detect(frame)
    }
}
