use marker_nav_core::FrameGeometryError;

/// Per-frame errors surfaced by [`crate::MarkerNavigator`].
///
/// The pipeline itself never fails; these come from the frame dimensions or
/// the detector collaborator. Parameters are checked once, when the navigator
/// is built, and report [`marker_nav_core::ParamsError`] directly.
#[derive(thiserror::Error, Debug)]
pub enum NavError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Frame(#[from] FrameGeometryError),

    #[error("marker detection failed: {0}")]
    Detector(#[source] E),
}
