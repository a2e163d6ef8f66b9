//! # Contact resolution
//!
//! Rules run in order on a copy of the mapped keypoints; each rule sees what the
//! previous ones left. A rule whose anatomy is missing changes nothing.

use log::debug;

use crate::config::{ContactConstants, Roles};
use crate::data::{input::ContactRule, input::Reference, Fighters, Keypoint, Keypoints, Side};
use crate::resolve::locate;

/// Applies `rules` to scene-space keypoints and returns the result. `mapped` is untouched.
pub fn apply_contacts(
    mapped: &Fighters,
    rules: &[ContactRule],
    roles: Roles,
    constants: &ContactConstants,
) -> Fighters {
    let mut out = *mapped;
    for rule in rules {
        let applied = match rule {
            ContactRule::PinOnBodyTop { source, defender } => pin_on_body_top(
                &mut out,
                source,
                defender.unwrap_or(roles.defender),
                constants.torso_clearance,
            ),
            ContactRule::ChestToChest { attacker, defender } => chest_to_chest(
                &mut out,
                attacker.unwrap_or(roles.attacker),
                defender.unwrap_or(roles.defender),
                constants.chest_separation,
            ),
        };
        if !applied {
            debug!("contact rule {} skipped", rule.as_ref());
        }
    }
    out
}

/// Height of the top of the torso: the higher of shoulder mid and hip mid.
fn torso_top(keypoints: &Keypoints) -> Option<f32> {
    let shoulders = keypoints.midpoint(Keypoint::LShoulder, Keypoint::RShoulder)?;
    let hips = keypoints.midpoint(Keypoint::LHip, Keypoint::RHip)?;
    Some(shoulders.y.max(hips.y))
}

fn pin_on_body_top(fighters: &mut Fighters, source: &Reference, defender: Side, clearance: f32) -> bool {
    let (side, keypoint) = match locate(source, fighters) {
        Some(slot) => slot,
        None => return false,
    };
    let top = match torso_top(&fighters[defender]) {
        Some(top) => top,
        None => return false,
    };
    if let Some(mut point) = fighters[side].get(keypoint) {
        point.y = top + clearance;
        fighters[side].set(keypoint, point);
    }
    true
}

/// Slides the whole attacker horizontally onto the defender's chest, then levels it
/// `separation` above that chest.
fn chest_to_chest(fighters: &mut Fighters, attacker: Side, defender: Side, separation: f32) -> bool {
    if attacker == defender {
        return false;
    }
    let chest = |side: Side| fighters[side].midpoint(Keypoint::LShoulder, Keypoint::RShoulder);
    let (attacker_chest, defender_chest) = match (chest(attacker), chest(defender)) {
        (Some(a), Some(d)) => (a, d),
        _ => return false,
    };
    let (dx, dz) = (defender_chest.x - attacker_chest.x, defender_chest.z - attacker_chest.z);
    let level = defender_chest.y + separation;
    fighters[attacker] = fighters[attacker].map_points(|mut p| {
        p.x += dx;
        p.z += dz;
        p.y = level;
        p
    });
    true
}
