use glam::Vec3;

/// Renderable record attached to a node.
///
/// Geometry buffers stay with the render surface; the viewer only tracks what
/// it needs to drive rendering hints.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub primitive_count: usize,
    /// Base color for procedurally created meshes (e.g. the ground plane).
    pub color: Option<Vec3>,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, primitive_count: usize) -> Self {
        Self {
            name: name.into(),
            primitive_count,
            color: None,
            cast_shadows: false,
            receive_shadows: false,
        }
    }

    /// A flat square plane of `size` × `size` units.
    #[must_use]
    pub fn plane(size: f32, color: Vec3) -> Self {
        Self {
            name: format!("Plane{size}x{size}"),
            primitive_count: 1,
            color: Some(color),
            cast_shadows: false,
            receive_shadows: true,
        }
    }
}
