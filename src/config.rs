//! Viewer configuration.
//!
//! Every field has a default taken from the wristwatch page, so an empty JSON
//! object (`{}`) is a complete configuration. Partial objects override only
//! the fields they name.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::parts::{LightPositionBinding, PartTable, TieBreak, TriggerBinding};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 1.0,
            far: 1000.0,
            position: Vec3::new(6.0, 9.0, 4.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians from straight up.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub auto_rotate: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 1.0, 0.0),
            enable_damping: true,
            damping_factor: 0.05,
            enable_pan: false,
            min_distance: 5.0,
            max_distance: 20.0,
            min_polar_angle: 0.5,
            max_polar_angle: 1.5,
            auto_rotate: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub size: f32,
    pub color: u32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            color: 0x55_55_55,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotLightConfig {
    pub color: u32,
    pub intensity: f32,
    pub range: f32,
    /// Cone half-angle in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub position: Vec3,
    pub cast_shadows: bool,
    pub shadow_bias: f32,
}

impl Default for SpotLightConfig {
    fn default() -> Self {
        Self {
            color: 0x7f_7f_ff,
            intensity: 100.0,
            range: 100.0,
            angle: 0.3,
            penumbra: 1.0,
            position: Vec3::new(10.0, 60.0, 5.0),
            cast_shadows: true,
            shadow_bias: -0.0001,
        }
    }
}

/// Range a slider control offers. Only the page enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub controls: LightPositionBinding,
    pub x: SliderRange,
    pub y: SliderRange,
    pub z: SliderRange,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            controls: LightPositionBinding::default(),
            x: SliderRange {
                min: -50.0,
                max: 50.0,
                step: 0.1,
            },
            y: SliderRange {
                min: 0.0,
                max: 100.0,
                step: 0.1,
            },
            z: SliderRange {
                min: -50.0,
                max: 50.0,
                step: 0.1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory or URL prefix for assets.
    pub asset_root: String,
    pub model_file: String,
    /// Where the model root is placed in the scene.
    pub model_offset: Vec3,
    pub clear_color: u32,
    pub shadows: bool,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub ground: GroundConfig,
    pub spotlight: SpotLightConfig,
    pub sliders: SliderConfig,
    pub parts: PartTable,
    pub tie_break: TieBreak,
    pub triggers: Vec<TriggerBinding>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_root: "asset/".to_string(),
            model_file: "JamTanganReal.glb".to_string(),
            model_offset: Vec3::new(0.0, 1.05, -1.0),
            clear_color: 0xba_ba_ba,
            shadows: true,
            camera: CameraConfig::default(),
            orbit: OrbitConfig::default(),
            ground: GroundConfig::default(),
            spotlight: SpotLightConfig::default(),
            sliders: SliderConfig::default(),
            parts: PartTable::default(),
            tie_break: TieBreak::default(),
            triggers: TriggerBinding::defaults(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded viewer config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
