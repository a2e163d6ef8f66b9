//! Render configuration.
//!
//! Every field has a default matching the stock viewer, so an empty JSON object is a
//! valid config. Per-side fighter styles are replaced wholesale when given.

use std::path::Path;

use derivative::Derivative;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::data::Side;
use crate::error::{FrameError, Result};

/// Which side is on top. Contact rules read these when a rule names no side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Roles {
    #[derivative(Default(value = "Side::Red"))]
    pub attacker: Side,
    #[derivative(Default(value = "Side::Blue"))]
    pub defender: Side,
}

impl Roles {
    /// Draw order: defender first so the attacker paints over it.
    pub fn draw_order(&self) -> [Side; 2] {
        [self.defender, self.attacker]
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FighterStyle {
    pub color: String,
    /// Added to the scene height of every keypoint.
    pub lift: f32,
    pub joint_radius: f32,
    pub bone_radius: f32,
    pub opacity: f32,
    pub proxy_opacity: f32,
    pub torso_depth: f32,
    pub pelvis_depth: f32,
    /// Flat bone stroke width.
    pub stroke: f32,
    pub flat_joint_radius: f32,
}

impl FighterStyle {
    pub fn attacker() -> Self {
        FighterStyle {
            color: "#E53935".to_string(),
            lift: 6f32,
            joint_radius: 5f32,
            bone_radius: 3f32,
            opacity: 1f32,
            proxy_opacity: 0.28,
            torso_depth: 20f32,
            pelvis_depth: 18f32,
            stroke: 6f32,
            flat_joint_radius: 6f32,
        }
    }

    /// Thinner and translucent.
    pub fn defender() -> Self {
        FighterStyle {
            color: "#1E88E5".to_string(),
            lift: 0f32,
            joint_radius: 4f32,
            bone_radius: 2.5,
            opacity: 0.5,
            proxy_opacity: 0.18,
            ..Self::attacker()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct ContactConstants {
    /// Gap between a pinned point and the defender's torso top.
    #[derivative(Default(value = "6.0"))]
    pub torso_clearance: f32,
    /// Height of the attacker above the defender's chest after chest-to-chest.
    #[derivative(Default(value = "10.0"))]
    pub chest_separation: f32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct OverlayStyle {
    #[derivative(Default(value = "\"#616161\".to_string()"))]
    pub flat_color: String,
    #[derivative(Default(value = "\"#666\".to_string()"))]
    pub scene_color: String,
    #[derivative(Default(value = "16.0"))]
    pub flat_chevron_step: f32,
    #[derivative(Default(value = "14.0"))]
    pub scene_chevron_step: f32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct RenderConfig {
    pub roles: Roles,
    #[derivative(Default(value = "FighterStyle::attacker()"))]
    pub red: FighterStyle,
    #[derivative(Default(value = "FighterStyle::defender()"))]
    pub blue: FighterStyle,
    pub contact: ContactConstants,
    pub overlay: OverlayStyle,
    /// Emit torso and pelvis boxes in the scene.
    #[derivative(Default(value = "true"))]
    pub show_proxies: bool,
    #[derivative(Default(value = "\"#fafafa\".to_string()"))]
    pub background: String,
}

impl RenderConfig {
    pub fn style(&self, side: Side) -> &FighterStyle {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<()> {
        if self.roles.attacker == self.roles.defender {
            return Err(FrameError::Config(format!(
                "attacker and defender are both '{}'",
                self.roles.attacker
            )));
        }
        Ok(())
    }
}

static DEFAULTS: Lazy<RenderConfig> = Lazy::new(RenderConfig::default);

/// Shared stock configuration.
pub fn defaults() -> &'static RenderConfig {
    &DEFAULTS
}
