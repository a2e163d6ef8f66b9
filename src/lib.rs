//! # frame_geom
//!
//! Geometry for technique frames: two stick-figure fighters on a mat plus annotation
//! overlays, turned into flat (SVG) or 3D scene primitives.
//!
//! ```text
//! frame JSON ─ data::input ─┬─ resolve ─ overlay::render_flat ─ compose_flat ─ svg
//!                           └─ mapping ─ contact ─ geometry / overlay::render_scene ─ compose_scene
//! ```
//!
//! Missing data never fails: an unresolvable reference or a missing keypoint just
//! drops the bone, joint or overlay that needed it.

pub mod data;

pub mod compose;
pub mod config;
pub mod contact;
pub mod error;
pub mod geometry;
pub mod mapping;
pub mod overlay;
pub mod player;
pub mod resolve;
pub mod svg;

pub use crate::compose::{compose_flat, compose_scene, FlatScene, Scene};
pub use crate::config::RenderConfig;
pub use crate::data::input::{ContactRule, Frame, Overlay, OverlayKind, Reference};
pub use crate::data::{Fighters, Keypoint, Keypoints, Mat, Point, Side};
pub use crate::error::{FrameError, Result};
