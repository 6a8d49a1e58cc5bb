use log::trace;
use marker_nav_core::{
    FrameGeometry, FrameGeometryError, FrameResult, MarkerObservation, MarkerSample, NavParams,
    ParamsError,
};

use crate::{aggregate, GeometryEstimator, MarkerDetector, NavError, NoDetector, RowGrouper};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-frame navigation pipeline around a reusable marker detector.
///
/// Holds no state between frames besides the detector and the immutable
/// parameters.
pub struct MarkerNavigator<D = NoDetector> {
    detector: D,
    params: NavParams,
    grouper: RowGrouper,
    estimator: GeometryEstimator,
}

impl MarkerNavigator<NoDetector> {
    /// Navigator for callers that already have marker samples or observations.
    pub fn without_detector(params: NavParams) -> Result<Self, ParamsError> {
        Self::new(NoDetector, params)
    }
}

impl<D> MarkerNavigator<D> {
    /// Validate `params` and build the pipeline stages once.
    pub fn new(detector: D, params: NavParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            detector,
            params,
            grouper: RowGrouper::new(params.grouping),
            estimator: GeometryEstimator::new(params.camera, params.geometry),
        })
    }

    #[inline]
    pub fn params(&self) -> &NavParams {
        &self.params
    }

    #[inline]
    pub fn detector(&self) -> &D {
        &self.detector
    }

    #[inline]
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn into_detector(self) -> D {
        self.detector
    }

    /// Frame geometry using the configured reference margin.
    pub fn frame_geometry(
        &self,
        width: u32,
        height: u32,
    ) -> Result<FrameGeometry, FrameGeometryError> {
        FrameGeometry::new(width, height, self.params.geometry.reference_margin_px)
    }

    /// Group samples into rows and aggregate their metrics.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, samples, frame), fields(samples = samples.len()))
    )]
    pub fn process_samples(&self, samples: &[MarkerSample], frame: &FrameGeometry) -> FrameResult {
        let rows = self.grouper.group(samples);
        trace!("{} sample(s) -> {} row(s)", samples.len(), rows.len());
        aggregate(&rows, &self.estimator, frame, self.params.heading_policy)
    }

    /// Reduce detector observations to centroids and run the pipeline.
    pub fn process_observations(
        &self,
        observations: &[MarkerObservation],
        frame: &FrameGeometry,
    ) -> FrameResult {
        let samples: Vec<MarkerSample> = observations.iter().map(MarkerSample::from).collect();
        self.process_samples(&samples, frame)
    }

    /// Run the detector on `image`, then the pipeline on its observations.
    pub fn process_frame<F: ?Sized>(
        &mut self,
        image: &F,
        frame: &FrameGeometry,
    ) -> Result<FrameResult, NavError<D::Error>>
    where
        D: MarkerDetector<F>,
    {
        let observations = self.detector.detect(image).map_err(NavError::Detector)?;
        Ok(self.process_observations(&observations, frame))
    }

    /// [`Self::process_frame`] for an image of `width` x `height` pixels.
    pub fn process_image<F: ?Sized>(
        &mut self,
        image: &F,
        width: u32,
        height: u32,
    ) -> Result<FrameResult, NavError<D::Error>>
    where
        D: MarkerDetector<F>,
    {
        let frame = self.frame_geometry(width, height)?;
        self.process_frame(image, &frame)
    }
}
