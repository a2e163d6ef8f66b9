//! # Overlay rendering
//!
//! One routine per [`OverlayKind`], in a flat (mat-pixel) and a scene flavour.
//! Output keeps input order, so later overlays paint on top. An overlay whose
//! required reference does not resolve emits nothing.

mod flat;
mod scene;

use log::debug;

use crate::config::OverlayStyle;
use crate::data::input::{Overlay, OverlayKind, Reference};
use crate::data::output::{Dash, FlatMark, SceneMark};
use crate::data::{Fighters, Point};
use crate::resolve::resolve;

const LOOP_DASH: Dash = Dash(6f32, 6f32);
const GRIP_DASH: Dash = Dash(4f32, 4f32);

/// Resolved form of an overlay, ready to draw.
enum Resolved<'a> {
    Arrow { from: Point, to: Point },
    Loop { points: Vec<Point>, anchor: Option<Point> },
    Chevrons { at: Point, dir: nalgebra::Vector3<f32>, count: usize },
    Label { at: Point, text: &'a str },
    Pin { at: Point },
    Grip { a: Point, b: Point },
}

fn resolve_overlay<'a>(overlay: &'a Overlay, fighters: &Fighters) -> Option<Resolved<'a>> {
    let at = |r: &Reference| resolve(r, fighters);
    let resolved = match &overlay.kind {
        OverlayKind::Arrow { from, to } => Resolved::Arrow { from: at(from)?, to: at(to)? },
        OverlayKind::Loop { path } => {
            let points: Vec<Point> = path.iter().filter_map(at).collect();
            if points.is_empty() {
                return None;
            }
            Resolved::Loop { anchor: path.first().and_then(at), points }
        }
        OverlayKind::Chevrons { at: origin, dir, count } => Resolved::Chevrons {
            at: at(origin)?,
            dir: *dir,
            count: *count,
        },
        OverlayKind::Label { at: anchor, text } => Resolved::Label { at: at(anchor)?, text },
        OverlayKind::Pin { at: anchor } => Resolved::Pin { at: at(anchor)? },
        OverlayKind::Grip { a, b } => Resolved::Grip { a: at(a)?, b: at(b)? },
    };
    Some(resolved)
}

/// Unit vector along `dir`; a zero vector is treated as having length 1.
fn unit(dir: &nalgebra::Vector3<f32>) -> nalgebra::Vector3<f32> {
    let len = dir.norm();
    if len > 0f32 {
        dir / len
    } else {
        *dir
    }
}

/// Renders overlays in mat-pixel space against raw fighter keypoints.
pub fn render_flat(overlays: &[Overlay], fighters: &Fighters, style: &OverlayStyle) -> Vec<FlatMark> {
    let mut marks = Vec::new();
    for overlay in overlays {
        match resolve_overlay(overlay, fighters) {
            Some(resolved) => flat::draw(&resolved, overlay, style, &mut marks),
            None => debug!("overlay {} skipped: unresolved reference", overlay.kind.as_ref()),
        }
    }
    marks
}

/// Renders overlays in scene space against mapped (and contact-resolved) keypoints.
/// Literal coordinates are taken as scene coordinates.
pub fn render_scene(overlays: &[Overlay], mapped: &Fighters, style: &OverlayStyle) -> Vec<SceneMark> {
    let mut marks = Vec::new();
    for overlay in overlays {
        match resolve_overlay(overlay, mapped) {
            Some(resolved) => scene::draw(&resolved, overlay, style, &mut marks),
            None => debug!("overlay {} skipped: unresolved reference", overlay.kind.as_ref()),
        }
    }
    marks
}
