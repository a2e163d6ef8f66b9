//! # Bone and body geometry
//!
//! Cylinders and cones are authored along +Y; [`BoneGeometry::rotation`] turns that
//! axis onto the bone.

use geo::{Coordinate, Line};
use nalgebra as na;

use crate::data::{Keypoint, Keypoints, Point};

/// Stand-in length for a bone whose endpoints coincide.
pub const MIN_BONE_LENGTH: f32 = 1e-4;

const AXIS_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneGeometry {
    pub midpoint: Point,
    pub length: f32,
    pub rotation: na::UnitQuaternion<f32>,
}

impl BoneGeometry {
    /// Unit direction of the placed cylinder.
    pub fn direction(&self) -> na::Vector3<f32> {
        self.rotation * na::Vector3::<f32>::y()
    }

    /// Rotation as axis * angle.
    pub fn scaled_axis(&self) -> na::Vector3<f32> {
        self.rotation.scaled_axis()
    }

    pub fn endpoints(&self) -> (Point, Point) {
        let half = self.direction() * (self.length / 2f32);
        (self.midpoint - half, self.midpoint + half)
    }
}

/// Places a +Y cylinder between `a` and `b`.
///
/// Coincident points get [`MIN_BONE_LENGTH`] and the identity rotation.
pub fn bone_geometry(a: &Point, b: &Point) -> BoneGeometry {
    let d = b - a;
    let distance = d.norm();
    let (length, rotation) = if distance > 0f32 {
        (distance.max(MIN_BONE_LENGTH), rotation_from_up(&(d / distance)))
    } else {
        (MIN_BONE_LENGTH, na::UnitQuaternion::identity())
    };
    BoneGeometry {
        midpoint: na::center(a, b),
        length,
        rotation,
    }
}

/// Minimal rotation taking +Y onto the unit vector `v`.
pub fn rotation_from_up(v: &na::Vector3<f32>) -> na::UnitQuaternion<f32> {
    let up = na::Vector3::<f32>::y();
    let axis = up.cross(v);
    let angle = up.dot(v).clamp(-1f32, 1f32).acos();
    // parallel or anti-parallel: any perpendicular axis works, angle is 0 or π
    let axis = if axis.norm() > AXIS_EPSILON {
        na::Unit::new_normalize(axis)
    } else {
        na::Vector3::x_axis()
    };
    na::UnitQuaternion::from_axis_angle(&axis, angle)
}

/// Drops elevation: the mat-pixel position of a point.
pub fn flat(p: &Point) -> Coordinate<f32> {
    Coordinate { x: p.x, y: p.y }
}

pub fn bone_segment(a: &Point, b: &Point) -> Line<f32> {
    Line::new(flat(a), flat(b))
}

/// Axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
    pub center: Point,
    pub size: na::Vector3<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorsoProxies {
    pub torso: Cuboid,
    pub pelvis: Cuboid,
}

const MIN_TORSO_HEIGHT: f32 = 20f32;
const MIN_PELVIS_HEIGHT: f32 = 12f32;

/// Torso and pelvis boxes from the four torso keypoints, or `None` if any is missing.
pub fn torso_proxies(keypoints: &Keypoints, torso_depth: f32, pelvis_depth: f32) -> Option<TorsoProxies> {
    let (ls, rs) = (keypoints.get(Keypoint::LShoulder)?, keypoints.get(Keypoint::RShoulder)?);
    let (lh, rh) = (keypoints.get(Keypoint::LHip)?, keypoints.get(Keypoint::RHip)?);

    let shoulder_mid = na::center(&ls, &rs);
    let hip_mid = na::center(&lh, &rh);
    let spine = na::distance(&shoulder_mid, &hip_mid);
    let shoulder_span = na::distance(&ls, &rs);
    let hip_span = na::distance(&lh, &rh);

    Some(TorsoProxies {
        torso: Cuboid {
            center: na::center(&shoulder_mid, &hip_mid),
            size: na::Vector3::new(
                (shoulder_span * 0.9).max(hip_span * 0.9),
                spine.max(MIN_TORSO_HEIGHT),
                torso_depth,
            ),
        },
        pelvis: Cuboid {
            center: hip_mid,
            size: na::Vector3::new(hip_span * 0.9, (spine * 0.3).max(MIN_PELVIS_HEIGHT), pelvis_depth),
        },
    })
}
