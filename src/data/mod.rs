use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

use nalgebra as na;
use serde::Deserialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the two fighters on the mat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    /// Lookup order for bare keypoint names.
    pub const PRECEDENCE: [Side; 2] = [Side::Red, Side::Blue];
}

/// The fixed keypoint vocabulary. The discriminant is the slot in [`Keypoints`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    num_enum::TryFromPrimitive, num_enum::IntoPrimitive,
    Display, EnumString, AsRefStr,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum Keypoint {
    Head = 0,
    Neck = 1,
    LShoulder = 2,
    RShoulder = 3,
    LElbow = 4,
    RElbow = 5,
    LWrist = 6,
    RWrist = 7,
    LHip = 8,
    RHip = 9,
    LKnee = 10,
    RKnee = 11,
    LAnkle = 12,
    RAnkle = 13,
}

pub const KEYPOINT_COUNT: usize = 14;

/// Skeleton topology, shared by the flat and the scene renderer.
pub const BONES: [(Keypoint, Keypoint); 14] = [
    (Keypoint::Head, Keypoint::Neck),
    (Keypoint::Neck, Keypoint::LShoulder),
    (Keypoint::Neck, Keypoint::RShoulder),
    (Keypoint::LShoulder, Keypoint::LElbow),
    (Keypoint::LElbow, Keypoint::LWrist),
    (Keypoint::RShoulder, Keypoint::RElbow),
    (Keypoint::RElbow, Keypoint::RWrist),
    (Keypoint::LShoulder, Keypoint::LHip),
    (Keypoint::RShoulder, Keypoint::RHip),
    (Keypoint::LHip, Keypoint::RHip),
    (Keypoint::LHip, Keypoint::LKnee),
    (Keypoint::LKnee, Keypoint::LAnkle),
    (Keypoint::RHip, Keypoint::RKnee),
    (Keypoint::RKnee, Keypoint::RAnkle),
];

/// Every point in the crate is 3D.
///
/// In mat space: `x` right, `y` down (pixels), `z` elevation.
/// In scene space (after [`crate::mapping`]): `x` right, `y` up, `z` towards the viewer.
pub type Point = na::Point3<f32>;

/// Lifts a 2- or 3-component coordinate into a [`Point`]; a missing third component is 0.
/// Any other length is not a point.
pub fn normalize(coords: &[f32]) -> Option<Point> {
    match *coords {
        [x, y] => Some(Point::new(x, y, 0f32)),
        [x, y, z] => Some(Point::new(x, y, z)),
        _ => None,
    }
}

/// Keypoint table of one fighter. Fixed size and `Copy`, so every pipeline stage
/// works on its own copy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoints([Option<Point>; KEYPOINT_COUNT]);

impl Keypoints {
    pub fn get(&self, keypoint: Keypoint) -> Option<Point> {
        self.0[u8::from(keypoint) as usize]
    }

    pub fn set(&mut self, keypoint: Keypoint, point: Point) {
        self.0[u8::from(keypoint) as usize] = Some(point);
    }

    pub fn remove(&mut self, keypoint: Keypoint) -> Option<Point> {
        self.0[u8::from(keypoint) as usize].take()
    }

    /// Present keypoints in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Keypoint, Point)> + '_ {
        self.0.iter().enumerate().filter_map(|(slot, point)| {
            let keypoint = Keypoint::try_from(slot as u8).ok()?;
            point.map(|p| (keypoint, p))
        })
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to every present point.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        let mut out = *self;
        for slot in out.0.iter_mut() {
            *slot = slot.map(&mut f);
        }
        out
    }

    /// Midpoint of two keypoints, if both are present.
    pub fn midpoint(&self, a: Keypoint, b: Keypoint) -> Option<Point> {
        Some(na::center(&self.get(a)?, &self.get(b)?))
    }
}

impl std::iter::FromIterator<(Keypoint, Point)> for Keypoints {
    fn from_iter<I: IntoIterator<Item = (Keypoint, Point)>>(iter: I) -> Self {
        let mut out = Keypoints::default();
        for (keypoint, point) in iter {
            out.set(keypoint, point);
        }
        out
    }
}

/// Both fighters' keypoints, in whichever space the current stage works in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fighters {
    pub red: Keypoints,
    pub blue: Keypoints,
}

impl Index<Side> for Fighters {
    type Output = Keypoints;

    fn index(&self, side: Side) -> &Keypoints {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }
}

impl IndexMut<Side> for Fighters {
    fn index_mut(&mut self, side: Side) -> &mut Keypoints {
        match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        }
    }
}

/// Mat size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, derive_more::Display)]
#[display(fmt = "{}x{}", width, height)]
pub struct Mat {
    pub width: f32,
    pub height: f32,
}

impl Mat {
    pub const DEFAULT: Mat = Mat { width: 1000f32, height: 600f32 };
}

impl Default for Mat {
    fn default() -> Self {
        Mat::DEFAULT
    }
}

pub mod input;

pub mod output;
