//! Mat-pixel space to scene space.

use crate::config::RenderConfig;
use crate::data::{Fighters, Keypoints, Mat, Point, Side};

/// Centers the mat on the origin and turns elevation into height:
/// `X = x - W/2`, `Y = z + lift`, `Z = -(y - H/2)`.
///
/// `lift` only keeps two fighters from z-fighting.
pub fn map_to_scene(keypoints: &Keypoints, mat: Mat, lift: f32) -> Keypoints {
    let (half_w, half_h) = (mat.width / 2f32, mat.height / 2f32);
    keypoints.map_points(|p| Point::new(p.x - half_w, p.z + lift, -(p.y - half_h)))
}

/// Maps both fighters with their configured lifts.
pub fn map_fighters(fighters: &Fighters, mat: Mat, config: &RenderConfig) -> Fighters {
    let mut mapped = Fighters::default();
    for &side in Side::PRECEDENCE.iter() {
        mapped[side] = map_to_scene(&fighters[side], mat, config.style(side).lift);
    }
    mapped
}
