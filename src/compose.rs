//! # Scene composition
//!
//! Puts one frame together: defender rig, attacker rig, then overlays.

use crate::config::{FighterStyle, RenderConfig};
use crate::contact::apply_contacts;
use crate::data::input::Frame;
use crate::data::output::{FlatPrimitive, ScenePrimitive};
use crate::data::{Fighters, Keypoints, Mat, BONES};
use crate::geometry::{bone_geometry, bone_segment, flat, torso_proxies};
use crate::mapping::map_fighters;
use crate::overlay::{render_flat, render_scene};

/// A frame drawn in mat-pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatScene {
    pub mat: Mat,
    pub background: String,
    pub primitives: Vec<FlatPrimitive>,
}

/// A frame drawn in scene space.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Keypoints after mapping and contact rules.
    pub mapped: Fighters,
    pub primitives: Vec<ScenePrimitive>,
}

fn flat_rig(keypoints: &Keypoints, style: &FighterStyle, out: &mut Vec<FlatPrimitive>) {
    for &(a, b) in BONES.iter() {
        if let (Some(pa), Some(pb)) = (keypoints.get(a), keypoints.get(b)) {
            out.push(FlatPrimitive::Bone {
                segment: bone_segment(&pa, &pb),
                color: style.color.clone(),
                width: style.stroke,
            });
        }
    }
    for (_, point) in keypoints.iter() {
        out.push(FlatPrimitive::Joint {
            center: flat(&point),
            radius: style.flat_joint_radius,
            color: style.color.clone(),
        });
    }
}

pub fn compose_flat(frame: &Frame, config: &RenderConfig) -> FlatScene {
    let mut primitives = Vec::new();
    for &side in config.roles.draw_order().iter() {
        flat_rig(&frame.fighters[side], config.style(side), &mut primitives);
    }
    primitives.extend(
        render_flat(&frame.overlays, &frame.fighters, &config.overlay)
            .into_iter()
            .map(FlatPrimitive::Overlay),
    );
    FlatScene {
        mat: frame.mat,
        background: config.background.clone(),
        primitives,
    }
}

fn scene_rig(keypoints: &Keypoints, style: &FighterStyle, proxies: bool, out: &mut Vec<ScenePrimitive>) {
    if proxies {
        if let Some(boxes) = torso_proxies(keypoints, style.torso_depth, style.pelvis_depth) {
            for cuboid in [boxes.torso, boxes.pelvis].iter() {
                out.push(ScenePrimitive::Proxy {
                    center: cuboid.center,
                    size: cuboid.size,
                    color: style.color.clone(),
                    opacity: style.proxy_opacity,
                });
            }
        }
    }
    for &(a, b) in BONES.iter() {
        if let (Some(pa), Some(pb)) = (keypoints.get(a), keypoints.get(b)) {
            out.push(ScenePrimitive::Bone {
                geometry: bone_geometry(&pa, &pb),
                radius: style.bone_radius,
                color: style.color.clone(),
                opacity: style.opacity,
            });
        }
    }
    for (_, center) in keypoints.iter() {
        out.push(ScenePrimitive::Joint {
            center,
            radius: style.joint_radius,
            color: style.color.clone(),
            opacity: style.opacity,
        });
    }
}

/// Maps the frame into scene space, applies its contact rules, and draws it.
pub fn compose_scene(frame: &Frame, config: &RenderConfig) -> Scene {
    let mapped = map_fighters(&frame.fighters, frame.mat, config);
    let mapped = apply_contacts(&mapped, &frame.contacts, config.roles, &config.contact);

    let mut primitives = Vec::new();
    for &side in config.roles.draw_order().iter() {
        scene_rig(&mapped[side], config.style(side), config.show_proxies, &mut primitives);
    }
    primitives.extend(
        render_scene(&frame.overlays, &mapped, &config.overlay)
            .into_iter()
            .map(ScenePrimitive::Overlay),
    );
    Scene { mapped, primitives }
}
