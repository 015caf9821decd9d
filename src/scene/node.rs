use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeHandle};

/// A scene node.
///
/// Nodes keep only the hierarchy, the transform and a name. Renderable data
/// lives in the scene's component maps and is referenced by key.
///
/// The name comes straight from the loaded asset: it may be empty, and several
/// nodes may share one.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub visible: bool,

    /// Geometry attached to this node, if it renders anything.
    pub mesh: Option<MeshKey>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("")
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
