use glam::Vec3;
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::camera::Camera;
use crate::scene::light::SpotLight;
use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::transform_system;
use crate::scene::{MeshKey, NodeHandle};

/// Scene graph.
///
/// Owns every node and component. Everything outside the scene refers to
/// nodes through [`NodeHandle`]s, which go stale (lookups return `None`) once
/// a node is removed.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Components ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SecondaryMap<NodeHandle, Camera>,
    pub lights: SecondaryMap<NodeHandle, SpotLight>,

    pub background: Vec3,
    pub shadows_enabled: bool,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SecondaryMap::new(),
            lights: SecondaryMap::new(),
            background: Vec3::ZERO,
            shadows_enabled: false,
            active_camera: None,
        }
    }

    // ========================================================================
    // Node lifecycle & hierarchy
    // ========================================================================

    /// Creates a detached node. It is not rendered until it is attached to a
    /// root or added with [`Scene::add_root`].
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.nodes.insert(Node::with_name(name))
    }

    /// Inserts a node as a new root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Promotes an existing detached node to a root.
    pub fn add_root(&mut self, handle: NodeHandle) {
        if !self.nodes.contains_key(handle) {
            log::warn!("add_root: node does not exist");
            return;
        }
        if !self.root_nodes.contains(&handle) {
            self.root_nodes.push(handle);
        }
    }

    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.attach(handle, parent);
        handle
    }

    /// Makes `child` a child of `parent`, detaching it from wherever it was.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach a node below its own descendant");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    /// Detaches `root` and deletes it together with its descendants and
    /// their components. Handles into the subtree go stale.
    pub fn remove_subtree(&mut self, root: NodeHandle) {
        let Some(parent) = self.nodes.get(root).map(|n| n.parent) else {
            return;
        };
        match parent {
            Some(p) => {
                if let Some(n) = self.nodes.get_mut(p) {
                    n.children.retain(|&c| c != root);
                }
            }
            None => self.root_nodes.retain(|&r| r != root),
        }

        for handle in self.subtree(root) {
            if let Some(node) = self.nodes.remove(handle)
                && let Some(mesh) = node.mesh
            {
                self.meshes.remove(mesh);
            }
            self.cameras.remove(handle);
            self.lights.remove(handle);
            if self.active_camera == Some(handle) {
                self.active_camera = None;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    #[inline]
    pub fn transform_mut(&mut self, handle: NodeHandle) -> Option<&mut Transform> {
        self.nodes.get_mut(handle).map(|n| &mut n.transform)
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Visits `root` and all of its descendants in depth-first pre-order,
    /// children in insertion order.
    pub fn traverse(&self, root: NodeHandle, mut visit: impl FnMut(NodeHandle, &Node)) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            visit(handle, node);
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Visits every node reachable from the root list, roots in order.
    pub fn traverse_roots(&self, mut visit: impl FnMut(NodeHandle, &Node)) {
        for &root in &self.root_nodes {
            self.traverse(root, &mut visit);
        }
    }

    /// Handles of `root` and its descendants, in [`Scene::traverse`] order.
    #[must_use]
    pub fn subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        self.traverse(root, |handle, _| out.push(handle));
        out
    }

    // ========================================================================
    // Components
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn set_mesh(&mut self, node: NodeHandle, mesh: MeshKey) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.mesh = Some(mesh);
        }
    }

    /// Mesh attached to `node`, if any.
    #[must_use]
    pub fn mesh_of(&self, node: NodeHandle) -> Option<&Mesh> {
        let key = self.nodes.get(node)?.mesh?;
        self.meshes.get(key)
    }

    pub fn mesh_of_mut(&mut self, node: NodeHandle) -> Option<&mut Mesh> {
        let key = self.nodes.get(node)?.mesh?;
        self.meshes.get_mut(key)
    }

    pub fn set_camera(&mut self, node: NodeHandle, camera: Camera) {
        if self.nodes.contains_key(node) {
            self.cameras.insert(node, camera);
        }
    }

    pub fn set_light(&mut self, node: NodeHandle, light: SpotLight) {
        if self.nodes.contains_key(node) {
            self.lights.insert(node, light);
        }
    }

    #[must_use]
    pub fn light(&self, node: NodeHandle) -> Option<&SpotLight> {
        self.lights.get(node)
    }

    /// Transform and camera of the active camera node.
    #[must_use]
    pub fn main_camera(&self) -> Option<(&Transform, &Camera)> {
        let handle = self.active_camera?;
        let node = self.nodes.get(handle)?;
        let camera = self.cameras.get(handle)?;
        Some((&node.transform, camera))
    }

    pub fn main_camera_mut(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let handle = self.active_camera?;
        let node = self.nodes.get_mut(handle)?;
        let camera = self.cameras.get_mut(handle)?;
        Some((&mut node.transform, camera))
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Recomputes world matrices from the current local transforms.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &mut self.cameras, &self.root_nodes);
    }
}
