//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create nodes, attach/reparent, roots
//! - Traversal order
//! - Component management: mesh, camera, spotlight
//! - World matrix propagation and camera view matrices
//! - Transform Euler accessors and look_at
//! - Orbit controls placement and damping

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};
use watch_viewer::config::OrbitConfig;
use watch_viewer::scene::light::color_from_hex;
use watch_viewer::scene::{Axis, Camera, Mesh, Node, Scene, SpotLight, Transform};
use watch_viewer::utils::{Input, OrbitControls};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn created_nodes_are_detached_until_added() {
    let mut scene = Scene::new();
    let handle = scene.create_node_with_name("Loose");
    assert_eq!(scene.get_name(handle), Some("Loose"));
    assert!(scene.root_nodes.is_empty());

    scene.add_root(handle);
    scene.add_root(handle);
    assert_eq!(scene.root_nodes, vec![handle]);
}

#[test]
fn attach_moves_a_node_between_parents() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::with_name("A"));
    let b = scene.add_node(Node::with_name("B"));
    let child = scene.add_to_parent(Node::with_name("Child"), a);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(a));
    assert_eq!(scene.get_node(a).unwrap().children(), &[child]);

    scene.attach(child, b);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
}

#[test]
fn attaching_a_root_removes_it_from_the_roots() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::with_name("A"));
    let b = scene.add_node(Node::with_name("B"));
    scene.attach(b, a);
    assert_eq!(scene.root_nodes, vec![a]);
}

#[test]
fn self_attach_is_ignored() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::with_name("A"));
    scene.attach(a, a);
    assert!(scene.get_node(a).unwrap().parent().is_none());
    assert!(scene.get_node(a).unwrap().children().is_empty());
}

#[test]
fn attaching_below_a_descendant_is_refused() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::with_name("A"));
    let b = scene.add_to_parent(Node::with_name("B"), a);
    let c = scene.add_to_parent(Node::with_name("C"), b);

    scene.attach(a, c);
    assert!(scene.get_node(a).unwrap().parent().is_none());
    assert_eq!(scene.root_nodes, vec![a]);
    assert_eq!(scene.subtree(a), vec![a, b, c]);
}

#[test]
fn removing_a_subtree_frees_nodes_and_meshes() {
    let mut scene = Scene::new();
    let keep = scene.add_node(Node::with_name("Ground"));
    let model = scene.add_node(Node::with_name("Model"));
    let part = scene.add_to_parent(Node::with_name("Part"), model);
    let key = scene.add_mesh(Mesh::new("Part".to_string(), 1));
    scene.set_mesh(part, key);

    scene.remove_subtree(model);
    assert!(scene.get_node(model).is_none());
    assert!(scene.get_node(part).is_none());
    assert!(scene.meshes.get(key).is_none());
    assert_eq!(scene.root_nodes, vec![keep]);

    let mut visited = Vec::new();
    scene.traverse_roots(|handle, _| visited.push(handle));
    assert_eq!(visited, vec![keep]);
}

#[test]
fn traversal_is_depth_first_pre_order() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::with_name("root"));
    let a = scene.add_to_parent(Node::with_name("a"), root);
    scene.add_to_parent(Node::with_name("a1"), a);
    scene.add_to_parent(Node::with_name("a2"), a);
    let b = scene.add_to_parent(Node::with_name("b"), root);
    scene.add_to_parent(Node::with_name("b1"), b);

    let mut names = Vec::new();
    scene.traverse(root, |_, node| names.push(node.name.clone()));
    assert_eq!(names, vec!["root", "a", "a1", "a2", "b", "b1"]);
    assert_eq!(scene.subtree(b).len(), 2);
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn meshes_are_looked_up_through_their_node() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::with_name("Plane"));
    assert!(scene.mesh_of(node).is_none());

    let key = scene.add_mesh(Mesh::plane(20.0, color_from_hex(0x555555)));
    scene.set_mesh(node, key);
    let mesh = scene.mesh_of(node).unwrap();
    assert!(mesh.receive_shadows);
    assert!(!mesh.cast_shadows);
    assert!(vec3_approx(mesh.color.unwrap(), Vec3::splat(85.0 / 255.0)));

    scene.mesh_of_mut(node).unwrap().cast_shadows = true;
    assert!(scene.mesh_of(node).unwrap().cast_shadows);
    assert!(scene.get_node(node).unwrap().is_mesh());
}

#[test]
fn components_need_a_live_node() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new());
    scene.nodes.remove(node);

    scene.set_light(node, SpotLight::new(Vec3::ONE, 1.0, 0.0, 0.3, 1.0));
    scene.set_camera(node, Camera::new_perspective(45.0, 1.0, 1.0, 100.0));
    assert!(scene.light(node).is_none());
    assert!(scene.cameras.get(node).is_none());
}

#[test]
fn spotlight_penumbra_is_clamped() {
    let light = SpotLight::new(color_from_hex(0x7f7fff), 100.0, 100.0, 0.3, 2.0);
    assert_eq!(light.penumbra, 1.0);
    assert_eq!(light.inner_cone(), 0.0);
    assert!(vec3_approx(light.color, Vec3::new(127.0 / 255.0, 127.0 / 255.0, 1.0)));
}

// ============================================================================
// World matrices
// ============================================================================

#[test]
fn world_matrices_compose_down_the_hierarchy() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::with_name("parent"));
    let child = scene.add_to_parent(Node::with_name("child"), parent);

    {
        let t = scene.transform_mut(parent).unwrap();
        t.position = Vec3::new(0.0, 1.05, -1.0);
        t.set_rotation_about(Axis::Y, FRAC_PI_2);
    }
    scene.transform_mut(child).unwrap().position = Vec3::new(1.0, 0.0, 0.0);
    scene.update_matrix_world();

    // +X rotated a quarter turn about Y points along -Z.
    let world = scene.get_node(child).unwrap().transform.world_position();
    assert!(vec3_approx(world, Vec3::new(0.0, 1.05, -2.0)));

    scene.transform_mut(parent).unwrap().position = Vec3::ZERO;
    scene.update_matrix_world();
    let world = scene.get_node(child).unwrap().transform.world_position();
    assert!(vec3_approx(world, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn camera_view_matrix_follows_its_node() {
    let mut scene = Scene::new();
    let mut node = Node::with_name("camera");
    node.transform.position = Vec3::new(0.0, 0.0, 10.0);
    let handle = scene.add_node(node);
    scene.set_camera(handle, Camera::new_perspective(45.0, 1.0, 1.0, 1000.0));
    scene.active_camera = Some(handle);

    scene.update_matrix_world();
    let (_, camera) = scene.main_camera().unwrap();
    let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
    assert!(camera.view_matrix().abs_diff_eq(expected, 1e-5));
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn euler_angles_accumulate_per_axis() {
    let mut t = Transform::new();
    t.set_rotation_about(Axis::X, 0.4);
    t.set_rotation_about(Axis::X, t.rotation_about(Axis::X) + 3.0 * PI);
    assert!(approx_eq(t.rotation_about(Axis::X), 0.4 + 3.0 * PI));
    assert_eq!(t.rotation_about(Axis::Y), 0.0);
}

#[test]
fn look_at_points_negative_z_at_the_target() {
    let mut t = Transform::new();
    t.position = Vec3::new(6.0, 9.0, 4.0);
    let target = Vec3::new(0.0, 1.0, 0.0);
    t.look_at(target, Vec3::Y);

    let forward = t.quaternion() * Vec3::NEG_Z;
    assert!(vec3_approx(forward, (target - t.position).normalize()));
}

#[test]
fn look_at_its_own_position_is_a_no_op() {
    let mut t = Transform::new();
    t.position = Vec3::ONE;
    t.set_rotation_about(Axis::Z, 0.25);
    t.look_at(Vec3::ONE, Vec3::Y);
    assert_eq!(t.rotation, Vec3::new(0.0, 0.0, 0.25));
}

// ============================================================================
// Orbit controls
// ============================================================================

#[test]
fn orbit_starts_at_the_configured_camera_position() {
    let controls = OrbitControls::from_config(Vec3::new(6.0, 9.0, 4.0), &OrbitConfig::default());
    assert!(vec3_approx(controls.position(), Vec3::new(6.0, 9.0, 4.0)));
    assert!(!controls.enable_pan);
}

#[test]
fn orbit_pulls_an_out_of_range_start_inside_the_limits() {
    let controls = OrbitControls::from_config(Vec3::new(0.0, 101.0, 0.0), &OrbitConfig::default());
    assert!(approx_eq(controls.radius, 20.0));
    assert!(approx_eq(controls.phi, 0.5));
}

#[test]
fn damped_rotation_keeps_gliding_after_release() {
    let mut controls = OrbitControls::from_config(Vec3::new(0.0, 1.0, 10.0), &OrbitConfig::default());
    let mut camera = Transform::new();
    let mut input = Input::new();
    input.handle_resize(600, 600);

    input.handle_pointer_button(watch_viewer::utils::PointerButton::Primary, true);
    input.handle_pointer_move(0.0, 0.0);
    input.handle_pointer_move(60.0, 0.0);
    controls.update(&mut camera, &input, 45f32.to_radians(), 1.0 / 60.0);
    input.end_frame();
    input.handle_pointer_button(watch_viewer::utils::PointerButton::Primary, false);

    let after_drag = controls.theta;
    controls.update(&mut camera, &input, 45f32.to_radians(), 1.0 / 60.0);
    assert!(controls.theta < after_drag);
    assert!(approx_eq(controls.radius, 10.0));
    assert!(approx_eq(controls.phi, 1.5));
}
