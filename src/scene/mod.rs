//! Scene graph
//!
//! - [`Node`]: hierarchy entry with a name and a [`Transform`]
//! - [`Scene`]: node arena plus mesh, camera and light components
//! - [`transform_system`]: world-matrix propagation

pub mod camera;
pub mod light;
pub mod mesh;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use camera::Camera;
pub use light::{SpotLight, SpotShadow};
pub use mesh::Mesh;
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Generation-checked handle to a [`Node`]. Does not keep the node alive.
    pub struct NodeHandle;
    pub struct MeshKey;
}

/// A principal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    #[must_use]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    #[inline]
    pub fn set_component(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }
}
