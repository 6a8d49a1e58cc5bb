//! Recorded detection streams and the detector that replays them.

use std::fs;
use std::path::Path;

use marker_nav::{MarkerDetector, MarkerObservation};
use serde::{Deserialize, Serialize};

/// One captured frame: its size and the markers the detector reported.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub markers: Vec<MarkerObservation>,
}

/// A sequence of frames in capture order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
}

#[derive(thiserror::Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed recording {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("recording {path} contains no frames")]
    Empty { path: String },
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: display.clone(),
            source,
        })?;
        let recording: Recording =
            serde_json::from_str(&raw).map_err(|source| RecordingError::Parse {
                path: display.clone(),
                source,
            })?;
        if recording.frames.is_empty() {
            return Err(RecordingError::Empty { path: display });
        }
        Ok(recording)
    }
}

/// A marker whose corners cannot be used.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("marker {id} has a non-finite corner")]
pub struct NonFiniteCorner {
    pub id: u32,
}

/// Detector that hands back the markers stored with each recorded frame.
#[derive(Debug, Default)]
pub struct ReplayDetector {
    frames_seen: usize,
}

impl ReplayDetector {
    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }
}

impl MarkerDetector<RecordedFrame> for ReplayDetector {
    type Error = NonFiniteCorner;

    fn detect(&mut self, frame: &RecordedFrame) -> Result<Vec<MarkerObservation>, Self::Error> {
        self.frames_seen += 1;
        if let Some(bad) = frame
            .markers
            .iter()
            .find(|m| m.corners.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()))
        {
            return Err(NonFiniteCorner { id: bad.id });
        }
        Ok(frame.markers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frames_with_and_without_markers() {
        let raw = r#"{"frames":[
            {"width":640,"height":480},
            {"width":640,"height":480,"markers":[{"id":1,"corners":[[0,0],[2,0],[2,2],[0,2]]}]}
        ]}"#;
        let rec: Recording = serde_json::from_str(raw).expect("parse");
        assert_eq!(rec.frames.len(), 2);
        assert!(rec.frames[0].markers.is_empty());
        assert_eq!(rec.frames[1].markers[0].id, 1);
    }

    const ONE_MARKER: &str =
        r#"{"width":8,"height":8,"markers":[{"id":4,"corners":[[0,0],[2,0],[2,2],[0,2]]}]}"#;

    #[test]
    fn replay_returns_stored_markers() {
        let frame: RecordedFrame = serde_json::from_str(ONE_MARKER).expect("parse");
        let mut det = ReplayDetector::default();
        let markers = det.detect(&frame).expect("detect");
        assert_eq!(markers, frame.markers);
        assert_eq!(det.frames_seen(), 1);
    }

    #[test]
    fn replay_rejects_non_finite_corners() {
        let mut frame: RecordedFrame = serde_json::from_str(ONE_MARKER).expect("parse");
        frame.markers[0].corners[2].x = f32::NAN;
        let err = ReplayDetector::default().detect(&frame).unwrap_err();
        assert_eq!(err, NonFiniteCorner { id: 4 });
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Recording::load(Path::new("/nonexistent/recording.json")).unwrap_err();
        assert!(matches!(err, RecordingError::Io { .. }));
    }
}
