//! SVG output for flat scenes.
//!
//! Colors and text come straight from frame JSON, so every string written into the
//! document is escaped.

use std::fmt::{self, Write};

use geo::{Coordinate, LineString};
use itertools::Itertools;

use crate::compose::FlatScene;
use crate::data::output::{Dash, FlatMark, FlatPrimitive};

fn points(path: &LineString<f32>) -> String {
    path.0.iter().map(|c| format!("{},{}", c.x, c.y)).join(" ")
}

fn dash_attr(dash: &Option<Dash>) -> String {
    dash.map(|d| format!(" stroke-dasharray=\"{}\"", d)).unwrap_or_default()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn line(s: &mut String, a: Coordinate<f32>, b: Coordinate<f32>, color: &str, width: f32, extra: &str) -> fmt::Result {
    writeln!(
        s,
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
        a.x,
        a.y,
        b.x,
        b.y,
        escape(color),
        width,
        extra
    )
}

fn circle(s: &mut String, c: Coordinate<f32>, r: f32, color: &str) -> fmt::Result {
    writeln!(s, "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>", c.x, c.y, r, escape(color))
}

fn mark(s: &mut String, mark: &FlatMark) -> fmt::Result {
    match mark {
        FlatMark::Stroke { segment, color, width, dash } => {
            line(s, segment.start, segment.end, color, *width, &dash_attr(dash))
        }
        FlatMark::Polyline { path, color, width, dash } => writeln!(
            s,
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"{}/>",
            points(path),
            escape(color),
            width,
            dash_attr(dash)
        ),
        FlatMark::Fill { shape, color } => writeln!(
            s,
            "<polygon points=\"{}\" fill=\"{}\"/>",
            points(shape.exterior()),
            escape(color)
        ),
        FlatMark::Dot { center, radius, color } => circle(s, *center, *radius, color),
        FlatMark::Text { at, text, color, size, anchor } => writeln!(
            s,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\">{}</text>",
            at.x,
            at.y,
            size,
            escape(color),
            anchor,
            escape(text)
        ),
    }
}

fn write_svg(s: &mut String, scene: &FlatScene) -> fmt::Result {
    writeln!(
        s,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" style=\"background:{}\">",
        scene.mat.width,
        scene.mat.height,
        escape(&scene.background)
    )?;
    for primitive in &scene.primitives {
        match primitive {
            FlatPrimitive::Bone { segment, color, width } => {
                line(s, segment.start, segment.end, color, *width, " stroke-linecap=\"round\"")?
            }
            FlatPrimitive::Joint { center, radius, color } => circle(s, *center, *radius, color)?,
            FlatPrimitive::Overlay(m) => mark(s, m)?,
        }
    }
    s.write_str("</svg>\n")
}

/// Writes `scene` as a standalone SVG document with a `0 0 W H` view box.
pub fn to_svg(scene: &FlatScene) -> String {
    let mut s = String::new();
    // writing into a String cannot fail
    if write_svg(&mut s, scene).is_err() {
        s.clear();
    }
    s
}
