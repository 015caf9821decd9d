use glam::{Affine3A, EulerRot, Mat3, Mat4, Quat, Vec3};

use crate::scene::Axis;

/// The TRS values the cached local matrix was last built from.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BuiltFrom {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

/// Position, Euler rotation and scale of a node plus its cached matrices.
///
/// Rotation is kept as XYZ Euler angles in radians. Each axis can be tweened
/// on its own, and a value such as `3π` stays `3π` instead of being folded
/// back by a quaternion round trip.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    /// `None` forces the next [`update_local_matrix`](Self::update_local_matrix)
    /// to rebuild.
    built_from: Option<BuiltFrom>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            built_from: None,
        }
    }

    fn snapshot(&self) -> BuiltFrom {
        BuiltFrom {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Rebuilds the local matrix when position, rotation or scale moved since
    /// the previous build. Returns `true` if it did.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = self.snapshot();
        if self.built_from == Some(current) {
            return false;
        }

        self.local_matrix = Affine3A::from_scale_rotation_translation(current.scale, self.quaternion(), current.position);
        self.built_from = Some(current);
        true
    }

    pub fn mark_dirty(&mut self) {
        self.built_from = None;
    }

    // --- rotation ---

    #[inline]
    #[must_use]
    pub fn quaternion(&self) -> Quat {
        let Vec3 { x, y, z } = self.rotation;
        Quat::from_euler(EulerRot::XYZ, x, y, z)
    }

    /// Replaces the Euler angles with the decomposition of `rotation`, which
    /// falls in the principal range.
    pub fn set_quaternion(&mut self, rotation: Quat) {
        self.rotation = rotation.to_euler(EulerRot::XYZ).into();
    }

    #[inline]
    #[must_use]
    pub fn rotation_about(&self, axis: Axis) -> f32 {
        axis.component(self.rotation)
    }

    #[inline]
    pub fn set_rotation_about(&mut self, axis: Axis, radians: f32) {
        axis.set_component(&mut self.rotation, radians);
    }

    /// Turns the node so its -Z axis faces `target`, both expressed in the
    /// parent's space. Does nothing when `target` is the node's own position
    /// or lies straight along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        let Some(right) = forward.cross(up).try_normalize() else {
            return;
        };
        let true_up = right.cross(forward);
        self.set_quaternion(Quat::from_mat3(&Mat3::from_cols(right, true_up, -forward)));
    }

    // --- matrices ---

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// Column-major 4x4 world matrix for render surfaces.
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        self.world_matrix.into()
    }

    pub fn set_world_matrix(&mut self, world: Affine3A) {
        self.world_matrix = world;
    }

    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
