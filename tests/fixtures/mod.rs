#![allow(dead_code)]

use frame_geom::{Frame, Keypoint, Keypoints, Point};

/// Knee-on-belly arm triangle: blue on its back, red kneeling across.
pub const KNEE_ON_BELLY: &str = include_str!("knee_on_belly.json");

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn knee_on_belly() -> Frame {
    init_logging();
    Frame::from_json_str(KNEE_ON_BELLY).expect("fixture frame parses")
}

pub fn keypoints(points: &[(Keypoint, [f32; 3])]) -> Keypoints {
    points
        .iter()
        .map(|&(keypoint, [x, y, z])| (keypoint, Point::new(x, y, z)))
        .collect()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

pub fn assert_point_eq(actual: &Point, expected: &Point) {
    assert!(
        (actual - expected).norm() < 1e-4,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
