//! Run the navigation pipeline on a synthetic gate seen at a few offsets.
//!
//! `cargo run -p marker-nav --example synthetic_gate`

use log::{info, LevelFilter};
use marker_nav::core::init_with_level;
use marker_nav::{MarkerNavigator, MarkerObservation, NavParams};
use nalgebra::Point2;

fn tag(id: u32, cx: f32, cy: f32, side: f32) -> MarkerObservation {
    let h = side / 2.0;
    MarkerObservation {
        id,
        corners: [
            Point2::new(cx - h, cy - h),
            Point2::new(cx + h, cy - h),
            Point2::new(cx + h, cy + h),
            Point2::new(cx - h, cy + h),
        ],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug).map_err(|e| e.to_string())?;

    let nav = MarkerNavigator::without_detector(NavParams::default())?;
    let frame = nav.frame_geometry(640, 480)?;

    for (offset, pitch) in [(-200.0, 40.0), (0.0, 60.0), (150.0, 90.0)] {
        let x0 = 320.0 + offset - 1.5 * pitch;
        let tags: Vec<MarkerObservation> = (0..4)
            .map(|k| tag(k, x0 + k as f32 * pitch, 240.0, pitch * 0.4))
            .collect();
        let result = nav.process_observations(&tags, &frame);
        info!(
            "offset {offset:+}px pitch {pitch}px -> heading {:+.1} deg, distance {:?}",
            result.heading_deg,
            result.rows.first().and_then(|r| r.distance_cm)
        );
    }
    Ok(())
}
