use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViewerError};
use crate::scene::{Axis, NodeHandle, Scene};

/// Maps three slider controls onto the x/y/z position of one light node.
///
/// Each control owns exactly one axis. Writes are immediate and never
/// clamped; the slider's own range is the only bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightPositionBinding {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for LightPositionBinding {
    fn default() -> Self {
        Self {
            x: "light-x".to_string(),
            y: "light-y".to_string(),
            z: "light-z".to_string(),
        }
    }
}

impl LightPositionBinding {
    /// Axis owned by `control`, if it is one of the three sliders.
    #[must_use]
    pub fn axis_for(&self, control: &str) -> Option<Axis> {
        if control == self.x {
            Some(Axis::X)
        } else if control == self.y {
            Some(Axis::Y)
        } else if control == self.z {
            Some(Axis::Z)
        } else {
            None
        }
    }

    /// Writes the slider's value into one coordinate of `light`.
    ///
    /// Returns `Ok(false)` for controls this binding does not own. Text that
    /// is not a finite number is rejected and leaves the light untouched.
    pub fn apply(&self, control: &str, raw: &str, scene: &mut Scene, light: NodeHandle) -> Result<bool> {
        let Some(axis) = self.axis_for(control) else {
            return Ok(false);
        };

        let value = parse_slider_value(raw).ok_or_else(|| ViewerError::InvalidSliderValue {
            control: control.to_string(),
            value: raw.to_string(),
        })?;

        let Some(transform) = scene.transform_mut(light) else {
            log::warn!("Light node is gone; ignoring {control}");
            return Ok(false);
        };
        axis.set_component(&mut transform.position, value);
        Ok(true)
    }
}

fn parse_slider_value(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
