//! # Frame input
//!
//! Frames arrive as loosely typed JSON. Everything here is parsed defensively: a
//! missing or malformed field falls back to an empty value, and an overlay or contact
//! that cannot be understood is dropped. Only I/O and JSON syntax errors surface.

use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use nalgebra as na;
use serde::Deserialize;
use serde_json::{Map, Value};
use strum_macros::AsRefStr;

use super::{normalize, Fighters, Keypoint, Keypoints, Mat, Point, Side};
use crate::error::Result;

/// A way to name a point: a literal coordinate, `side.keypoint`, or a bare keypoint name.
#[derive(Clone, Copy, Debug, PartialEq, derive_more::Display)]
pub enum Reference {
    #[display(fmt = "[{}, {}, {}]", "_0.x", "_0.y", "_0.z")]
    Literal(Point),
    #[display(fmt = "{}.{}", _0, _1)]
    Path(Side, Keypoint),
    #[display(fmt = "{}", _0)]
    Bare(Keypoint),
}

impl Reference {
    /// Parses a JSON reference. Arrays must hold 2 or 3 numbers; strings go through
    /// [`FromStr`]. Anything else is not a reference.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) => coords(value).map(Reference::Literal),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl FromStr for Reference {
    type Err = strum::ParseError;

    /// Anything after a second `.` is ignored: `red.r_knee.x` names `red.r_knee`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '.');
        match (parts.next(), parts.next()) {
            (Some(side), Some(keypoint)) => Ok(Reference::Path(side.parse()?, keypoint.parse()?)),
            _ => Ok(Reference::Bare(s.parse()?)),
        }
    }
}

/// Type-specific part of an overlay.
#[derive(Clone, Debug, PartialEq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OverlayKind {
    Arrow { from: Reference, to: Reference },
    /// Unparseable path entries are dropped at load time.
    Loop { path: Vec<Reference> },
    /// Also accepted under the `pressure` tag.
    Chevrons { at: Reference, dir: na::Vector3<f32>, count: usize },
    Label { at: Reference, text: String },
    Pin { at: Reference },
    Grip { a: Reference, b: Reference },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub color: Option<String>,
    pub label: Option<String>,
}

/// Constraint that repositions mapped keypoints to show contact between fighters.
/// A side left as `None` falls back to the configured role.
#[derive(Clone, Debug, PartialEq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ContactRule {
    PinOnBodyTop { source: Reference, defender: Option<Side> },
    ChestToChest { attacker: Option<Side>, defender: Option<Side> },
}

/// One parsed frame. Never mutated after parsing; later stages derive copies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub mat: Mat,
    pub fighters: Fighters,
    pub overlays: Vec<Overlay>,
    pub contacts: Vec<ContactRule>,
}

impl Frame {
    pub fn from_value(value: &Value) -> Self {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                warn!("frame is not a JSON object, treating it as empty");
                return Frame::default();
            }
        };

        Frame {
            mat: obj
                .get("mat")
                .and_then(|mat| mat.get("size"))
                .and_then(parse_mat)
                .unwrap_or_default(),
            fighters: obj.get("fighters").map(parse_fighters).unwrap_or_default(),
            overlays: list(obj, "overlays").filter_map(parse_overlay).collect(),
            contacts: list(obj, "contacts").filter_map(parse_contact).collect(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

fn list<'a>(obj: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    obj.get(key).and_then(Value::as_array).into_iter().flatten()
}

fn coords(value: &Value) -> Option<Point> {
    let items = value.as_array()?;
    let nums = items
        .iter()
        .map(|v| v.as_f64().map(|n| n as f32))
        .collect::<Option<Vec<_>>>()?;
    normalize(&nums)
}

fn parse_mat(size: &Value) -> Option<Mat> {
    match coords(size)? {
        p if p.z == 0f32 && p.x.is_finite() && p.y.is_finite() => Some(Mat { width: p.x, height: p.y }),
        _ => None,
    }
}

fn parse_fighters(value: &Value) -> Fighters {
    let mut fighters = Fighters::default();
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return fighters,
    };
    for (name, fighter) in obj {
        let side = match name.parse::<Side>() {
            Ok(side) => side,
            Err(_) => {
                debug!("ignoring fighter '{}'", name);
                continue;
            }
        };
        if let Some(keypoints) = fighter.get("keypoints").and_then(Value::as_object) {
            fighters[side] = parse_keypoints(side, keypoints);
        }
    }
    fighters
}

fn parse_keypoints(side: Side, raw: &Map<String, Value>) -> Keypoints {
    raw.iter()
        .filter_map(|(name, value)| {
            let keypoint = name.parse::<Keypoint>().ok();
            let point = coords(value);
            if keypoint.is_none() || point.is_none() {
                debug!("dropping keypoint {}.{} = {}", side, name, value);
            }
            Some((keypoint?, point?))
        })
        .collect()
}

#[derive(Deserialize)]
struct RawOverlay {
    #[serde(flatten)]
    kind: RawOverlayKind,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawOverlayKind {
    Arrow {
        from: Value,
        to: Value,
    },
    Loop {
        #[serde(default)]
        path: Vec<Value>,
    },
    #[serde(alias = "pressure")]
    Chevrons {
        at: Value,
        #[serde(default)]
        dir: Value,
        #[serde(default)]
        count: Value,
    },
    Label {
        at: Value,
        #[serde(default)]
        text: Option<String>,
    },
    Pin {
        at: Value,
    },
    Grip {
        a: Value,
        b: Value,
    },
}

const DEFAULT_CHEVRON_COUNT: usize = 3;
/// Upper bound on marks per chevron overlay.
pub const MAX_CHEVRON_COUNT: usize = 64;

fn chevron_count(count: &Value) -> usize {
    match count.as_f64() {
        Some(n) if n > MAX_CHEVRON_COUNT as f64 => {
            debug!("clamping chevron count {} to {}", count, MAX_CHEVRON_COUNT);
            MAX_CHEVRON_COUNT
        }
        Some(n) if n > 0f64 => n.floor() as usize,
        Some(_) => 0,
        None => DEFAULT_CHEVRON_COUNT,
    }
}

fn parse_overlay(value: &Value) -> Option<Overlay> {
    let raw: RawOverlay = match serde_json::from_value(value.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("dropping overlay {}: {}", value, e);
            return None;
        }
    };
    let mut label = raw.label;
    let required = |field: &str, v: &Value| {
        let parsed = Reference::parse(v);
        if parsed.is_none() {
            debug!("dropping overlay {}: bad '{}' reference", value, field);
        }
        parsed
    };

    let kind = match raw.kind {
        RawOverlayKind::Arrow { from, to } => OverlayKind::Arrow {
            from: required("from", &from)?,
            to: required("to", &to)?,
        },
        RawOverlayKind::Loop { path } => {
            // the label sits on the first path entry, so it goes when that entry is bad
            if path.first().and_then(Reference::parse).is_none() {
                label = None;
            }
            OverlayKind::Loop { path: path.iter().filter_map(Reference::parse).collect() }
        }
        RawOverlayKind::Chevrons { at, dir, count } => OverlayKind::Chevrons {
            at: required("at", &at)?,
            dir: coords(&dir).map(|p| p.coords).unwrap_or_else(na::Vector3::y),
            count: chevron_count(&count),
        },
        RawOverlayKind::Label { at, text } => OverlayKind::Label {
            at: required("at", &at)?,
            text: text.filter(|t| !t.is_empty())?,
        },
        RawOverlayKind::Pin { at } => OverlayKind::Pin { at: required("at", &at)? },
        RawOverlayKind::Grip { a, b } => OverlayKind::Grip {
            a: required("a", &a)?,
            b: required("b", &b)?,
        },
    };

    Some(Overlay { kind, color: raw.color, label })
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawContact {
    #[serde(rename = "pin-on-body-top", alias = "pinOnTorsoTop")]
    PinOnBodyTop {
        a: Value,
        #[serde(default)]
        b: Value,
    },
    #[serde(rename = "chest-to-chest", alias = "chestToChest")]
    ChestToChest {
        #[serde(default)]
        a: Value,
        #[serde(default)]
        b: Value,
    },
}

/// `"blue"` and `"blue.l_hip"` both name the blue side.
fn side_of(value: &Value) -> Option<Side> {
    let s = value.as_str()?;
    s.split('.').next()?.parse().ok()
}

fn parse_contact(value: &Value) -> Option<ContactRule> {
    let raw: RawContact = match serde_json::from_value(value.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("dropping contact {}: {}", value, e);
            return None;
        }
    };
    match raw {
        RawContact::PinOnBodyTop { a, b } => match Reference::parse(&a) {
            Some(source @ Reference::Path(..)) | Some(source @ Reference::Bare(_)) => {
                Some(ContactRule::PinOnBodyTop { source, defender: side_of(&b) })
            }
            _ => {
                debug!("dropping contact {}: source must name a keypoint", value);
                None
            }
        },
        RawContact::ChestToChest { a, b } => match (side_of(&a), side_of(&b)) {
            (Some(attacker), Some(defender)) if attacker == defender => {
                debug!("dropping contact {}: '{}' against itself", value, attacker);
                None
            }
            (attacker, defender) => Some(ContactRule::ChestToChest { attacker, defender }),
        },
    }
}
