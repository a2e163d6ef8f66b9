use nalgebra as na;

use super::{Resolved, GRIP_DASH, LOOP_DASH};
use crate::config::OverlayStyle;
use crate::data::input::Overlay;
use crate::data::output::SceneMark;
use crate::data::Point;
use crate::geometry::{bone_geometry, rotation_from_up};

const SHAFT_RADIUS: f32 = 1.6;
const ARROW_HEAD_RADIUS: f32 = 4f32;
const ARROW_HEAD_HEIGHT: f32 = 10f32;
const CHEVRON_RADIUS: f32 = 3f32;
const CHEVRON_HEIGHT: f32 = 8f32;
const MARK_WIDTH: f32 = 3f32;
const PIN_SPREAD: f32 = 6f32;
const GRIP_CAP_RADIUS: f32 = 4f32;

fn above(p: &Point, height: f32) -> Point {
    p + na::Vector3::new(0f32, height, 0f32)
}

pub(super) fn draw(resolved: &Resolved, overlay: &Overlay, style: &OverlayStyle, out: &mut Vec<SceneMark>) {
    let color = overlay.color.clone().unwrap_or_else(|| style.scene_color.clone());
    let label = overlay.label.as_deref().filter(|l| !l.is_empty());
    let text = |at: Point, text: &str, size: f32| SceneMark::Text {
        at,
        text: text.to_string(),
        color: color.clone(),
        size,
    };

    match resolved {
        Resolved::Arrow { from, to } => {
            let shaft = bone_geometry(from, to);
            out.push(SceneMark::Shaft { geometry: shaft, radius: SHAFT_RADIUS, color: color.clone() });
            out.push(SceneMark::Cone {
                center: *to,
                rotation: shaft.rotation,
                radius: ARROW_HEAD_RADIUS,
                height: ARROW_HEAD_HEIGHT,
                color: color.clone(),
            });
            if let Some(label) = label {
                out.push(text(above(&shaft.midpoint, 8f32), label, 14f32));
            }
        }
        Resolved::Loop { points, anchor } => {
            out.push(SceneMark::Polyline {
                points: points.clone(),
                color: color.clone(),
                width: MARK_WIDTH,
                dash: Some(LOOP_DASH),
            });
            if let (Some(label), Some(anchor)) = (label, anchor) {
                out.push(text(above(anchor, 10f32), label, 13f32));
            }
        }
        Resolved::Chevrons { at, dir, count } => {
            let u = super::unit(dir);
            let rotation = if u.norm() > 0f32 {
                rotation_from_up(&u)
            } else {
                na::UnitQuaternion::identity()
            };
            let step = style.scene_chevron_step;
            for i in 0..*count {
                out.push(SceneMark::Cone {
                    center: at + u * (step * (i + 1) as f32),
                    rotation,
                    radius: CHEVRON_RADIUS,
                    height: CHEVRON_HEIGHT,
                    color: color.clone(),
                });
            }
            if let Some(label) = label {
                let tail = at + u * (step * (*count as f32 + 0.5));
                out.push(text(above(&tail, 8f32), label, 13f32));
            }
        }
        Resolved::Label { at, text: body } => {
            out.push(text(above(at, 10f32), *body, 13f32));
        }
        Resolved::Pin { at } => {
            // cross lies flat on the mat
            for &(dx, dz) in &[(-PIN_SPREAD, -PIN_SPREAD), (-PIN_SPREAD, PIN_SPREAD)] {
                let arm = na::Vector3::new(dx, 0f32, dz);
                out.push(SceneMark::Polyline {
                    points: vec![at + arm, at - arm],
                    color: color.clone(),
                    width: MARK_WIDTH,
                    dash: None,
                });
            }
            if let Some(label) = label {
                out.push(text(at + na::Vector3::new(10f32, 0f32, -4f32), label, 12f32));
            }
        }
        Resolved::Grip { a, b } => {
            out.push(SceneMark::Polyline {
                points: vec![*a, *b],
                color: color.clone(),
                width: MARK_WIDTH,
                dash: Some(GRIP_DASH),
            });
            for &center in &[*a, *b] {
                out.push(SceneMark::Sphere { center, radius: GRIP_CAP_RADIUS, color: color.clone() });
            }
            if let Some(label) = label {
                out.push(text(above(&na::center(a, b), 8f32), label, 12f32));
            }
        }
    }
}
