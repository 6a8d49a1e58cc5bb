use approx::assert_relative_eq;
use marker_nav::{
    group_rows, FrameGeometry, MarkerNavigator, MarkerObservation, MarkerSample, NavParams,
    RowGrouper, RowGroupingParams, MARKERS_PER_ROW,
};
use nalgebra::Point2;

/// Small deterministic generator so the property sweeps are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next_u32() % (hi - lo + 1) as u32) as i32
    }
}

fn random_samples(rng: &mut Lcg) -> Vec<MarkerSample> {
    let n = rng.range(0, 24) as usize;
    (0..n)
        .map(|_| {
            let id = rng.range(0, 49) as u32;
            MarkerSample::new(id, rng.range(0, 1279), rng.range(0, 719))
        })
        .collect()
}

fn square(id: u32, cx: f32, cy: f32, half: f32) -> MarkerObservation {
    MarkerObservation {
        id,
        corners: [
            Point2::new(cx - half, cy - half),
            Point2::new(cx + half, cy - half),
            Point2::new(cx + half, cy + half),
            Point2::new(cx - half, cy + half),
        ],
    }
}

#[test]
fn every_emitted_row_is_complete_and_well_spaced() {
    let params = RowGroupingParams::default();
    let mut rng = Lcg(7);
    for _ in 0..500 {
        let samples = random_samples(&mut rng);
        for row in group_rows(&samples, params) {
            assert_eq!(row.members().len(), MARKERS_PER_ROW);
            for pair in row.members().windows(2) {
                let dx = (pair[1].x() - pair[0].x()).abs();
                assert!(
                    (10..=200).contains(&dx),
                    "adjacent members {:?} and {:?} are {dx}px apart",
                    pair[0],
                    pair[1]
                );
                assert!(pair[0].x() <= pair[1].x());
            }
        }
    }
}

#[test]
fn grouping_is_deterministic_including_ties() {
    let grouper = RowGrouper::default();
    let mut rng = Lcg(42);
    for _ in 0..200 {
        let mut samples = random_samples(&mut rng);
        // force x ties
        if samples.len() > 3 {
            let x = samples[0].x();
            samples[1].position.x = x;
            samples[2].position.x = x + 10;
            samples[3].position.x = x + 10;
        }
        let a = grouper.group(&samples);
        let b = grouper.group(&samples);
        assert_eq!(a, b);

        let mut reversed = samples.clone();
        reversed.reverse();
        let c = grouper.group(&reversed);
        let unique = {
            let mut keys: Vec<_> = samples.iter().map(|s| (s.x(), s.id)).collect();
            keys.sort_unstable();
            keys.windows(2).all(|w| w[0] != w[1])
        };
        if unique {
            assert_eq!(a, c);
        }
    }
}

#[test]
fn gate_of_four_tags_yields_heading_and_distance() {
    let nav = MarkerNavigator::without_detector(NavParams::default()).expect("params");
    let frame = FrameGeometry::new(640, 480, 10).expect("frame");
    let observations: Vec<MarkerObservation> = [100.0, 150.0, 200.0, 250.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| square(i as u32, x, 300.0, 6.0))
        .collect();

    let result = nav.process_observations(&observations, &frame);

    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.center, Point2::new(175, 300));
    assert_eq!(row.spacing_px, 150);
    assert_relative_eq!(row.distance_cm.expect("distance"), 2.5 * 2900.0 / 150.0);
    assert_relative_eq!(row.distance_cm.expect("distance"), 48.33, epsilon = 0.01);
    assert_relative_eq!(result.heading_deg, -18.3344, epsilon = 1e-3);
}

#[test]
fn far_fifth_marker_is_dropped() {
    let nav = MarkerNavigator::without_detector(NavParams::default()).expect("params");
    let frame = FrameGeometry::new(640, 480, 10).expect("frame");
    let samples: Vec<MarkerSample> = [100, 150, 200, 250, 650]
        .iter()
        .enumerate()
        .map(|(i, &x)| MarkerSample::new(i as u32, x, 300))
        .collect();

    let result = nav.process_samples(&samples, &frame);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].marker_ids, [0, 1, 2, 3]);
    assert_eq!(result.heading_deg, result.rows[0].heading_deg);
}

#[test]
fn frame_result_serializes_for_reports() {
    let nav = MarkerNavigator::without_detector(NavParams::default()).expect("params");
    let frame = FrameGeometry::new(640, 480, 10).expect("frame");
    let samples: Vec<MarkerSample> = [300, 310, 330, 340]
        .iter()
        .map(|&x| MarkerSample::new(x as u32, x, 200))
        .collect();
    let result = nav.process_samples(&samples, &frame);

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["reference_point"], serde_json::json!([320, 470]));
    assert_eq!(json["rows"][0]["center"], serde_json::json!([320, 200]));
    assert_eq!(json["rows"][0]["spacing_px"], 40);
    assert_eq!(json["heading_deg"], 0.0);
}
