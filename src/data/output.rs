//! # Render primitives
//!
//! What the pipeline hands to a drawing surface. Flat primitives live in mat-pixel
//! space, scene primitives in the centered y-up scene space.

use geo::{Coordinate, Line, LineString, Polygon};
use nalgebra as na;
use strum_macros::{AsRefStr, Display};

use super::Point;
use crate::geometry::BoneGeometry;

/// CSS color string, e.g. `#E53935`.
pub type Color = String;

/// Dash pattern: stroke length, gap length.
#[derive(Clone, Copy, Debug, PartialEq, derive_more::Display)]
#[display(fmt = "{} {}", _0, _1)]
pub struct Dash(pub f32, pub f32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlatPrimitive {
    Bone { segment: Line<f32>, color: Color, width: f32 },
    Joint { center: Coordinate<f32>, radius: f32, color: Color },
    Overlay(FlatMark),
}

/// Overlay shapes in mat-pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum FlatMark {
    Stroke { segment: Line<f32>, color: Color, width: f32, dash: Option<Dash> },
    Polyline { path: LineString<f32>, color: Color, width: f32, dash: Option<Dash> },
    Fill { shape: Polygon<f32>, color: Color },
    Dot { center: Coordinate<f32>, radius: f32, color: Color },
    Text { at: Coordinate<f32>, text: String, color: Color, size: f32, anchor: TextAnchor },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScenePrimitive {
    /// Cylinder authored along +Y, placed by `geometry`.
    Bone { geometry: BoneGeometry, radius: f32, color: Color, opacity: f32 },
    Joint { center: Point, radius: f32, color: Color, opacity: f32 },
    /// Axis-aligned box standing in for a torso or pelvis.
    Proxy { center: Point, size: na::Vector3<f32>, color: Color, opacity: f32 },
    Overlay(SceneMark),
}

/// Overlay shapes in scene space.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneMark {
    Shaft { geometry: BoneGeometry, radius: f32, color: Color },
    /// Cone authored along +Y, centered at `center` and turned by `rotation`.
    Cone { center: Point, rotation: na::UnitQuaternion<f32>, radius: f32, height: f32, color: Color },
    Polyline { points: Vec<Point>, color: Color, width: f32, dash: Option<Dash> },
    Sphere { center: Point, radius: f32, color: Color },
    Text { at: Point, text: String, color: Color, size: f32 },
}
