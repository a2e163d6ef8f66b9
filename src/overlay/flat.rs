use geo::{Coordinate, Line, LineString, Polygon};

use super::{Resolved, GRIP_DASH, LOOP_DASH};
use crate::config::OverlayStyle;
use crate::data::input::Overlay;
use crate::data::output::{Color, FlatMark, TextAnchor};
use crate::geometry::flat;

const ARROW_WIDTH: f32 = 4f32;
const ARROW_HEAD_LENGTH: f32 = 12f32;
const MARK_WIDTH: f32 = 3f32;
/// Half-width of arrowheads and chevrons, and half-size of pin crosses.
const SPREAD: f32 = 6f32;
const GRIP_CAP_RADIUS: f32 = 4f32;

fn text(at: Coordinate<f32>, text: &str, color: &Color, size: f32, anchor: TextAnchor) -> FlatMark {
    FlatMark::Text {
        at,
        text: text.to_string(),
        color: color.clone(),
        size,
        anchor,
    }
}

fn offset(c: Coordinate<f32>, dx: f32, dy: f32) -> Coordinate<f32> {
    Coordinate { x: c.x + dx, y: c.y + dy }
}

/// Unit (ux, uy); a zero vector is treated as having length 1.
fn unit(dx: f32, dy: f32) -> (f32, f32) {
    let len = dx.hypot(dy);
    let len = if len > 0f32 { len } else { 1f32 };
    (dx / len, dy / len)
}

pub(super) fn draw(resolved: &Resolved, overlay: &Overlay, style: &OverlayStyle, out: &mut Vec<FlatMark>) {
    let color = overlay.color.clone().unwrap_or_else(|| style.flat_color.clone());
    let label = overlay.label.as_deref().filter(|l| !l.is_empty());

    match resolved {
        Resolved::Arrow { from, to } => {
            let (a, b) = (flat(from), flat(to));
            let (ux, uy) = unit(b.x - a.x, b.y - a.y);
            let head = offset(b, -ux * ARROW_HEAD_LENGTH, -uy * ARROW_HEAD_LENGTH);
            out.push(FlatMark::Stroke {
                segment: Line::new(a, b),
                color: color.clone(),
                width: ARROW_WIDTH,
                dash: None,
            });
            out.push(FlatMark::Fill {
                shape: Polygon::new(
                    LineString::from(vec![
                        b,
                        offset(head, -uy * SPREAD, ux * SPREAD),
                        offset(head, uy * SPREAD, -ux * SPREAD),
                    ]),
                    vec![],
                ),
                color: color.clone(),
            });
            if let Some(label) = label {
                let mid = Coordinate { x: (a.x + b.x) / 2f32, y: (a.y + b.y) / 2f32 - 8f32 };
                out.push(text(mid, label, &color, 14f32, TextAnchor::Middle));
            }
        }
        Resolved::Loop { points, anchor } => {
            out.push(FlatMark::Polyline {
                path: points.iter().map(flat).collect::<Vec<_>>().into(),
                color: color.clone(),
                width: MARK_WIDTH,
                dash: Some(LOOP_DASH),
            });
            if let (Some(label), Some(anchor)) = (label, anchor) {
                out.push(text(offset(flat(anchor), 0f32, -10f32), label, &color, 13f32, TextAnchor::Start));
            }
        }
        Resolved::Chevrons { at, dir, count } => {
            let origin = flat(at);
            let (ux, uy) = unit(dir.x, dir.y);
            let step = style.flat_chevron_step;
            for i in 0..*count {
                let d = (i + 1) as f32 * step;
                let c = offset(origin, ux * d, uy * d);
                out.push(FlatMark::Polyline {
                    path: LineString::from(vec![
                        offset(c, -uy * SPREAD, ux * SPREAD),
                        c,
                        offset(c, uy * SPREAD, -ux * SPREAD),
                    ]),
                    color: color.clone(),
                    width: MARK_WIDTH,
                    dash: None,
                });
            }
            if let Some(label) = label {
                let d = (*count as f32 + 0.5) * step;
                let at = offset(origin, ux * d, uy * d - 8f32);
                out.push(text(at, label, &color, 13f32, TextAnchor::Start));
            }
        }
        Resolved::Label { at, text: body } => {
            out.push(text(offset(flat(at), 0f32, -10f32), body, &color, 13f32, TextAnchor::Start));
        }
        Resolved::Pin { at } => {
            let c = flat(at);
            for &(sx, sy) in &[(-SPREAD, -SPREAD), (-SPREAD, SPREAD)] {
                out.push(FlatMark::Stroke {
                    segment: Line::new(offset(c, sx, sy), offset(c, -sx, -sy)),
                    color: color.clone(),
                    width: MARK_WIDTH,
                    dash: None,
                });
            }
            if let Some(label) = label {
                out.push(text(offset(c, 10f32, 4f32), label, &color, 12f32, TextAnchor::Start));
            }
        }
        Resolved::Grip { a, b } => {
            let (a, b) = (flat(a), flat(b));
            out.push(FlatMark::Stroke {
                segment: Line::new(a, b),
                color: color.clone(),
                width: MARK_WIDTH,
                dash: Some(GRIP_DASH),
            });
            for &center in &[a, b] {
                out.push(FlatMark::Dot { center, radius: GRIP_CAP_RADIUS, color: color.clone() });
            }
            if let Some(label) = label {
                let mid = Coordinate { x: (a.x + b.x) / 2f32, y: (a.y + b.y) / 2f32 - 8f32 };
                out.push(text(mid, label, &color, 12f32, TextAnchor::Middle));
            }
        }
    }
}
