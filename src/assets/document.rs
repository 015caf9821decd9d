//! Intermediate model representation.
//!
//! A [`ModelDocument`] is parsed off the main timeline and holds only what the
//! viewer needs from a glTF file: the node hierarchy, names, local transforms
//! and which nodes carry geometry. It is turned into scene nodes by
//! [`ModelDocument::instantiate`].

use glam::{Quat, Vec3};

use crate::errors::{Result, ViewerError};
use crate::scene::{Mesh, NodeHandle, Scene};

#[derive(Debug, Clone, PartialEq)]
pub struct MeshInfo {
    pub name: String,
    pub primitive_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    /// Node name from the file; empty when the file gives none.
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub mesh: Option<MeshInfo>,
    /// Indices into [`ModelDocument::nodes`]. Out-of-range entries are
    /// skipped by [`ModelDocument::instantiate`].
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDocument {
    pub label: String,
    pub nodes: Vec<ModelNode>,
    /// Top-level nodes of the displayed scene.
    pub roots: Vec<usize>,
}

impl ModelDocument {
    /// Parses a `.glb` or `.gltf` byte slice. External buffers are not
    /// resolved; geometry data stays with the render surface.
    ///
    /// The document is not schema-validated. Hierarchy and mesh references
    /// are read from the raw JSON, and indices that point past the end of
    /// their array are dropped with a warning.
    pub fn from_gltf_slice(bytes: &[u8], label: &str) -> Result<Self> {
        let gltf = gltf::Gltf::from_slice_without_validation(bytes)?;
        let json = gltf.document.as_json();
        let node_count = json.nodes.len();

        let in_range = |index: usize, what: &str| {
            let ok = index < node_count;
            if !ok {
                log::warn!("{label}: {what} refers to node {index}, but the file has {node_count}");
            }
            ok
        };

        let nodes: Vec<ModelNode> = gltf
            .nodes()
            .zip(&json.nodes)
            .map(|(node, raw)| {
                let (t, r, s) = node.transform().decomposed();
                let mesh = raw.mesh.and_then(|index| match json.meshes.get(index.value()) {
                    Some(mesh) => Some(MeshInfo {
                        name: mesh.name.clone().unwrap_or_else(|| "Mesh".to_string()),
                        primitive_count: mesh.primitives.len(),
                    }),
                    None => {
                        log::warn!("{label}: node {} refers to missing mesh {}", node.index(), index.value());
                        None
                    }
                });
                ModelNode {
                    name: node.name().unwrap_or_default().to_string(),
                    translation: Vec3::from_array(t),
                    rotation: Quat::from_array(r),
                    scale: Vec3::from_array(s),
                    mesh,
                    children: raw
                        .children
                        .iter()
                        .flatten()
                        .map(|c| c.value())
                        .filter(|&c| in_range(c, "a child link"))
                        .collect(),
                }
            })
            .collect();

        if nodes.is_empty() {
            return Err(ViewerError::EmptyModel(label.to_string()));
        }

        let scene = json
            .scene
            .and_then(|index| json.scenes.get(index.value()))
            .or_else(|| json.scenes.first());
        let roots = match scene {
            Some(scene) => scene
                .nodes
                .iter()
                .map(|n| n.value())
                .filter(|&n| in_range(n, "the scene"))
                .collect(),
            None => parentless(&nodes),
        };

        Ok(Self {
            label: label.to_string(),
            nodes,
            roots,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Names of all nodes in file order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Creates the node tree in `scene` under a fresh `gltf_root` node and
    /// returns that root. The root is left detached so the caller decides
    /// where it goes.
    pub fn instantiate(&self, scene: &mut Scene) -> NodeHandle {
        let root = scene.create_node_with_name("gltf_root");

        let handles: Vec<NodeHandle> = self
            .nodes
            .iter()
            .map(|src| {
                let handle = scene.create_node_with_name(&src.name);
                if let Some(node) = scene.get_node_mut(handle) {
                    node.transform.position = src.translation;
                    node.transform.set_quaternion(src.rotation);
                    node.transform.scale = src.scale;
                }
                if let Some(info) = &src.mesh {
                    let mesh = scene.add_mesh(Mesh::new(info.name.clone(), info.primitive_count));
                    scene.set_mesh(handle, mesh);
                }
                handle
            })
            .collect();

        for (src, &parent) in self.nodes.iter().zip(&handles) {
            for child in src.children.iter().filter_map(|&i| handles.get(i)) {
                scene.attach(*child, parent);
            }
        }
        for node in self.roots.iter().filter_map(|&i| handles.get(i)) {
            scene.attach(*node, root);
        }

        root
    }
}

fn parentless(nodes: &[ModelNode]) -> Vec<usize> {
    let mut has_parent = vec![false; nodes.len()];
    for child in nodes.iter().flat_map(|n| n.children.iter()) {
        if let Some(flag) = has_parent.get_mut(*child) {
            *flag = true;
        }
    }
    (0..nodes.len()).filter(|&i| !has_parent[i]).collect()
}
