//! Viewer context tests
//!
//! Tests for:
//! - Initial scene setup (camera, spotlight, ground, status line)
//! - Resize: aspect, projection and a single synchronous surface resize
//! - Light sliders in any order, rejected input
//! - Frame loop: one render per tick, per-frame input cleared
//! - Model install and the loading lifecycle (success and failure)
//! - Orbit constraints applied to the camera

use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use glam::{Mat4, Vec3};
use serde_json::json;
use watch_viewer::assets::ModelDocument;
use watch_viewer::parts::{PartKey, RegistryState, TriggerOutcome};
use watch_viewer::scene::{Camera, Scene};
use watch_viewer::utils::PointerButton;
use watch_viewer::{RenderSurface, Viewer, ViewerConfig};

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-4;
const FRAME: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

#[derive(Default)]
struct RecordingSurface {
    resizes: Vec<(u32, u32)>,
    renders: usize,
    last_aspect: Option<f32>,
    last_mesh_count: usize,
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.renders += 1;
        self.last_aspect = Some(camera.aspect);
        let mut meshes = 0;
        scene.traverse_roots(|_, node| meshes += usize::from(node.mesh.is_some()));
        self.last_mesh_count = meshes;
    }
}

fn watch_gltf() -> serde_json::Value {
    let part = |name: &str, t: [f32; 3]| json!({ "name": name, "translation": t, "mesh": 0 });
    json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "Watch", "children": [1, 2, 3, 4, 5] },
            part("Puterputer", [0.0, 0.0, 0.0]),
            part("Tombol", [0.6, 0.0, 0.0]),
            part("Mekanik1", [-0.3, 0.1, 0.0]),
            part("Mekanik2", [0.0, 0.1, 0.0]),
            part("Mekanik3", [0.3, 0.1, 0.0])
        ],
        "meshes": [{ "name": "Part", "primitives": [{ "attributes": { "POSITION": 0 } }] }]
    })
}

/// Wraps a glTF JSON document in a binary GLB container.
fn glb(json: &serde_json::Value) -> Vec<u8> {
    let mut body = serde_json::to_vec(json).unwrap();
    while body.len() % 4 != 0 {
        body.push(b' ');
    }
    let total = 12 + 8 + body.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&body);
    out
}

fn watch_document() -> ModelDocument {
    ModelDocument::from_gltf_slice(&glb(&watch_gltf()), "watch.glb").unwrap()
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("watch-viewer-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Ticks until the pending load settles.
fn tick_until_loaded(viewer: &mut Viewer, surface: &mut RecordingSurface) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while viewer.is_loading() {
        assert!(Instant::now() < deadline, "model load did not finish");
        viewer.tick(FRAME, surface);
        std::thread::sleep(Duration::from_millis(2));
    }
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn new_viewer_builds_the_static_scene() {
    let viewer = Viewer::new(ViewerConfig::default());

    assert_eq!(viewer.status_text(), "LOADING");
    assert!(viewer.status_visible());
    assert!(matches!(viewer.registry_state(), RegistryState::Loading(_)));
    assert!(viewer.registry().is_none());
    assert!(viewer.model_root().is_none());
    assert!(!viewer.is_loading());

    let camera = viewer.camera().unwrap();
    assert!(approx_eq(camera.fov_degrees(), 45.0));
    assert!(approx_eq(camera.near, 1.0));
    assert!(approx_eq(camera.far, 1000.0));
    let camera_node = viewer.scene().get_node(viewer.camera_node()).unwrap();
    assert_eq!(camera_node.transform.position, Vec3::new(6.0, 9.0, 4.0));

    assert_eq!(viewer.light_position(), Vec3::new(10.0, 60.0, 5.0));
    let light = viewer.scene().light(viewer.light_node()).unwrap();
    assert!(light.cast_shadows);
    assert!(approx_eq(light.angle, 0.3));
    assert!(approx_eq(light.intensity, 100.0));
    assert!(approx_eq(light.shadow.bias, -0.0001));

    let ground = viewer.scene().get_node(viewer.ground_node()).unwrap();
    assert!(approx_eq(ground.transform.rotation.x, -FRAC_PI_2));
    let ground_mesh = viewer.scene().mesh_of(viewer.ground_node()).unwrap();
    assert!(ground_mesh.receive_shadows);

    assert!(viewer.scene().shadows_enabled);
    assert!(vec3_approx(viewer.scene().background, Vec3::splat(186.0 / 255.0)));
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_sets_aspect_and_resizes_the_surface_once() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();

    viewer.resize(800, 600, &mut surface);

    assert_eq!(surface.resizes, vec![(800, 600)]);
    let camera = viewer.camera().unwrap();
    assert!(approx_eq(camera.aspect, 800.0 / 600.0));
    let expected = Mat4::perspective_rh(camera.fov, 800.0 / 600.0, camera.near, camera.far);
    assert!(camera.projection_matrix().abs_diff_eq(expected, 1e-6));
    assert_eq!(viewer.input_state().screen_size, glam::Vec2::new(800.0, 600.0));
}

#[test]
fn the_next_frame_uses_the_new_aspect() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();

    viewer.resize(1920, 1080, &mut surface);
    viewer.tick(FRAME, &mut surface);
    assert!(approx_eq(surface.last_aspect.unwrap(), 1920.0 / 1080.0));

    viewer.resize(500, 1000, &mut surface);
    viewer.tick(FRAME, &mut surface);
    assert!(approx_eq(surface.last_aspect.unwrap(), 0.5));
    assert_eq!(surface.resizes.len(), 2);
}

#[test]
fn zero_height_keeps_the_previous_aspect() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();

    viewer.resize(400, 200, &mut surface);
    viewer.resize(400, 0, &mut surface);

    assert!(approx_eq(viewer.camera().unwrap().aspect, 2.0));
    assert_eq!(surface.resizes, vec![(400, 200), (400, 0)]);
    assert!(viewer.camera().unwrap().projection_matrix().is_finite());
}

// ============================================================================
// Sliders
// ============================================================================

#[test]
fn sliders_set_the_light_exactly_in_any_order() {
    let values = [("light-x", "1.5"), ("light-y", "2.0"), ("light-z", "-3.0")];
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for order in orders {
        let mut viewer = Viewer::default();
        for i in order {
            let (control, value) = values[i];
            assert!(viewer.input(control, value));
        }
        assert_eq!(viewer.light_position(), Vec3::new(1.5, 2.0, -3.0), "{order:?}");
    }
}

#[test]
fn each_slider_owns_one_axis() {
    let mut viewer = Viewer::default();
    assert!(viewer.input("light-y", "7"));
    assert_eq!(viewer.light_position(), Vec3::new(10.0, 7.0, 5.0));
    assert!(viewer.input("light-y", "8.25"));
    assert_eq!(viewer.light_position(), Vec3::new(10.0, 8.25, 5.0));
}

#[test]
fn slider_values_are_not_clamped() {
    let mut viewer = Viewer::default();
    assert!(viewer.input("light-x", "-1000"));
    assert_eq!(viewer.light_position().x, -1000.0);
}

#[test]
fn malformed_slider_input_leaves_the_light_alone() {
    let mut viewer = Viewer::default();
    let before = viewer.light_position();

    for raw in ["", "abc", "1.5.2", "NaN", "inf"] {
        assert!(!viewer.input("light-x", raw), "{raw:?}");
    }
    assert!(!viewer.input("light-w", "1.0"));
    assert_eq!(viewer.light_position(), before);
}

#[test]
fn light_stays_put_across_frames() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.input("light-x", "1.5");
    viewer.input("light-y", "2.0");
    viewer.input("light-z", "-3.0");
    for _ in 0..5 {
        viewer.tick(FRAME, &mut surface);
    }
    assert_eq!(viewer.light_position(), Vec3::new(1.5, 2.0, -3.0));
    let world = viewer
        .scene()
        .get_node(viewer.light_node())
        .unwrap()
        .transform
        .world_position();
    assert!(vec3_approx(world, Vec3::new(1.5, 2.0, -3.0)));
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn each_tick_renders_exactly_once() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    for expected in 1..=3 {
        viewer.tick(FRAME, &mut surface);
        assert_eq!(surface.renders, expected);
    }
    // Ground plane only.
    assert_eq!(surface.last_mesh_count, 1);
}

#[test]
fn tick_clears_per_frame_input() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.input_mut().handle_pointer_move(10.0, 10.0);
    viewer.input_mut().handle_pointer_move(30.0, 10.0);
    viewer.input_mut().handle_wheel(0.0, 1.0);

    viewer.tick(FRAME, &mut surface);
    assert_eq!(viewer.input_state().cursor_delta, glam::Vec2::ZERO);
    assert_eq!(viewer.input_state().scroll_delta, glam::Vec2::ZERO);
}

// ============================================================================
// Model install
// ============================================================================

#[test]
fn clicks_before_the_model_arrives_do_nothing() {
    let mut viewer = Viewer::default();
    for control in ["rotate-y-button", "tombol-button", "skrup1-button"] {
        assert_eq!(viewer.click(control), TriggerOutcome::NotReady);
    }
    assert_eq!(viewer.driver().active_count(), 0);
}

#[test]
fn installing_the_model_resolves_parts_and_hides_the_status() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.install_model(&watch_document());

    assert!(!viewer.status_visible());
    let registry = viewer.registry().unwrap();
    assert!(registry.missing().is_empty());
    let button = registry.get(PartKey::Button).unwrap();
    assert_eq!(viewer.scene().get_name(button), Some("Tombol"));
    assert!(viewer.scene().mesh_of(button).unwrap().cast_shadows);

    viewer.tick(FRAME, &mut surface);
    let root = viewer.model_root().unwrap();
    let root_world = viewer.scene().get_node(root).unwrap().transform.world_position();
    assert!(vec3_approx(root_world, Vec3::new(0.0, 1.05, -1.0)));

    let button_world = viewer.scene().get_node(button).unwrap().transform.world_position();
    assert!(vec3_approx(button_world, Vec3::new(0.6, 1.05, -1.0)));
    assert_eq!(surface.last_mesh_count, 6);
}

#[test]
fn clicks_after_install_animate_through_the_frame_loop() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.install_model(&watch_document());
    let base = viewer.registry().unwrap().get(PartKey::Base).unwrap();

    assert!(matches!(viewer.click("rotate-y-button"), TriggerOutcome::Submitted(_)));
    for _ in 0..40 {
        viewer.tick(FRAME, &mut surface);
    }
    let rotation = viewer.scene().get_node(base).unwrap().transform.rotation;
    assert!(approx_eq(rotation.y, 36f32.to_radians()));
    assert_eq!(viewer.driver().active_count(), 0);
}

#[test]
fn installing_a_second_model_deletes_the_first() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.install_model(&watch_document());
    let old_root = viewer.model_root().unwrap();
    let old_button = viewer.registry().unwrap().get(PartKey::Button).unwrap();
    let node_count = viewer.scene().nodes.len();

    assert!(matches!(viewer.click("tombol-button"), TriggerOutcome::Submitted(_)));
    viewer.tick(FRAME, &mut surface);

    viewer.install_model(&watch_document());
    assert!(viewer.scene().get_node(old_root).is_none());
    assert!(viewer.scene().get_node(old_button).is_none());
    assert_ne!(viewer.model_root(), Some(old_root));
    assert_eq!(viewer.scene().nodes.len(), node_count);
    assert_eq!(viewer.scene().meshes.len(), 6);

    // The pop on the removed button is dropped on the next frame.
    viewer.tick(FRAME, &mut surface);
    assert_eq!(viewer.driver().active_count(), 0);
    assert_eq!(surface.last_mesh_count, 6);
}

#[test]
fn model_without_parts_still_becomes_ready() {
    let gltf = json!({
        "asset": { "version": "2.0" },
        "nodes": [{ "name": "Cube" }]
    });
    let doc = ModelDocument::from_gltf_slice(&serde_json::to_vec(&gltf).unwrap(), "cube.gltf").unwrap();

    let mut viewer = Viewer::default();
    viewer.install_model(&doc);
    assert!(viewer.registry_state().is_ready());
    assert_eq!(viewer.click("tombol-button"), TriggerOutcome::PartAbsent(PartKey::Button));
}

// ============================================================================
// Loading lifecycle
// ============================================================================

#[test]
fn background_load_reports_progress_then_becomes_ready() {
    let dir = temp_dir("load-ok");
    std::fs::write(dir.join("JamTanganReal.glb"), glb(&watch_gltf())).unwrap();

    let config = ViewerConfig {
        asset_root: dir.to_string_lossy().into_owned(),
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config);
    let mut surface = RecordingSurface::default();
    viewer.start_loading().unwrap();
    assert!(viewer.is_loading());

    tick_until_loaded(&mut viewer, &mut surface);

    assert!(viewer.registry_state().is_ready());
    assert!(!viewer.status_visible());
    assert_eq!(viewer.status_text(), "LOADING 100/100");
    assert!(viewer.registry().unwrap().contains(PartKey::Mechanism3));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn failed_load_keeps_the_status_and_an_empty_registry() {
    let dir = temp_dir("load-missing");
    let config = ViewerConfig {
        asset_root: dir.to_string_lossy().into_owned(),
        model_file: "nope.glb".to_string(),
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config);
    let mut surface = RecordingSurface::default();
    viewer.start_loading().unwrap();

    tick_until_loaded(&mut viewer, &mut surface);

    assert!(matches!(viewer.registry_state(), RegistryState::Failed(_)));
    assert!(viewer.status_visible());
    assert_eq!(viewer.status_text(), "LOADING");
    assert_eq!(viewer.click("tombol-button"), TriggerOutcome::NotReady);

    // The rest of the viewer keeps working.
    assert!(viewer.input("light-x", "1.0"));
    viewer.tick(FRAME, &mut surface);
    assert!(surface.renders > 0);

    std::fs::remove_dir_all(dir).ok();
}

// ============================================================================
// Orbit controls
// ============================================================================

fn camera_offset(viewer: &Viewer) -> Vec3 {
    let position = viewer.scene().get_node(viewer.camera_node()).unwrap().transform.position;
    position - viewer.config().orbit.target
}

#[test]
fn zoom_is_clamped_to_the_distance_limits() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.resize(800, 600, &mut surface);

    viewer.input_mut().handle_wheel(0.0, 500.0);
    viewer.tick(FRAME, &mut surface);
    assert!(approx_eq(camera_offset(&viewer).length(), 5.0));

    viewer.input_mut().handle_wheel(0.0, -500.0);
    viewer.tick(FRAME, &mut surface);
    assert!(approx_eq(camera_offset(&viewer).length(), 20.0));
}

#[test]
fn dragging_never_leaves_the_polar_limits() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.resize(800, 600, &mut surface);

    for dy in [5000.0, -5000.0] {
        let input = viewer.input_mut();
        input.handle_pointer_button(PointerButton::Primary, true);
        input.handle_pointer_move(400.0, 300.0);
        input.handle_pointer_move(400.0, 300.0 + dy);
        for _ in 0..120 {
            viewer.tick(FRAME, &mut surface);
            let offset = camera_offset(&viewer);
            let polar = (offset.y / offset.length()).acos();
            assert!((0.5 - EPSILON..=1.5 + EPSILON).contains(&polar), "polar {polar}");
        }
        viewer.input_mut().handle_pointer_button(PointerButton::Primary, false);
    }
}

#[test]
fn camera_keeps_looking_at_the_target() {
    let mut viewer = Viewer::default();
    let mut surface = RecordingSurface::default();
    viewer.resize(800, 600, &mut surface);
    viewer.input_mut().handle_pointer_button(PointerButton::Primary, true);
    viewer.input_mut().handle_pointer_move(0.0, 0.0);
    viewer.input_mut().handle_pointer_move(120.0, 0.0);
    for _ in 0..30 {
        viewer.tick(FRAME, &mut surface);
    }

    let camera = viewer.scene().get_node(viewer.camera_node()).unwrap();
    let forward = camera.transform.quaternion() * Vec3::NEG_Z;
    let to_target = (viewer.config().orbit.target - camera.transform.position).normalize();
    assert!(forward.dot(to_target) > 0.999);
}
