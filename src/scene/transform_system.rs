//! World matrix propagation.
//!
//! Lives outside [`Scene`](crate::scene::Scene) so the walk can borrow the node
//! map mutably while reading the camera components and the root list.

use glam::Affine3A;
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::NodeHandle;
use crate::scene::camera::Camera;
use crate::scene::node::Node;

/// A node waiting to be visited, with what it inherits from its parent.
struct Pending {
    node: NodeHandle,
    parent_world: Affine3A,
    parent_moved: bool,
}

/// Refreshes world matrices below `roots`, parents before children.
///
/// A subtree whose local matrices and ancestors are unchanged is walked but
/// not recomputed. Camera components on moved nodes get new view matrices.
pub fn update_hierarchy(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SecondaryMap<NodeHandle, Camera>,
    roots: &[NodeHandle],
) {
    let mut pending: Vec<Pending> = roots
        .iter()
        .rev()
        .map(|&node| Pending {
            node,
            parent_world: Affine3A::IDENTITY,
            parent_moved: false,
        })
        .collect();

    while let Some(Pending { node: handle, parent_world, parent_moved }) = pending.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let moved = node.transform.update_local_matrix() | parent_moved;
        if moved {
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);
            if let Some(camera) = cameras.get_mut(handle) {
                camera.update_view_projection(&world);
            }
        }

        let world = *node.transform.world_matrix();
        pending.extend(node.children.iter().rev().map(|&child| Pending {
            node: child,
            parent_world: world,
            parent_moved: moved,
        }));
    }
}
