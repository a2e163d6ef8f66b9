//! Point resolution against a two-fighter keypoint set.

use serde_json::Value;

use crate::data::{input::Reference, Fighters, Keypoint, Point, Side};

/// Resolves `reference` to a point, or `None` when it names a missing keypoint.
/// Bare names try red first, then blue.
pub fn resolve(reference: &Reference, fighters: &Fighters) -> Option<Point> {
    match *reference {
        Reference::Literal(point) => Some(point),
        Reference::Path(side, keypoint) => fighters[side].get(keypoint),
        Reference::Bare(keypoint) => Side::PRECEDENCE
            .iter()
            .find_map(|&side| fighters[side].get(keypoint)),
    }
}

/// The keypoint slot a reference resolves through. Literals have none.
pub fn locate(reference: &Reference, fighters: &Fighters) -> Option<(Side, Keypoint)> {
    match *reference {
        Reference::Literal(_) => None,
        Reference::Path(side, keypoint) => fighters[side].get(keypoint).map(|_| (side, keypoint)),
        Reference::Bare(keypoint) => Side::PRECEDENCE
            .iter()
            .find(|&&side| fighters[side].get(keypoint).is_some())
            .map(|&side| (side, keypoint)),
    }
}

/// [`resolve`] straight from JSON.
pub fn resolve_value(value: &Value, fighters: &Fighters) -> Option<Point> {
    Reference::parse(value).and_then(|reference| resolve(&reference, fighters))
}
