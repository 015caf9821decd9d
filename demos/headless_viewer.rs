//! Headless Viewer
//!
//! Drives a [`Viewer`] without a window: loads the watch model (or a stand-in
//! node tree when the asset is not on disk), presses every button, moves the
//! spotlight and logs what a renderer would have been asked to draw.
//!
//! Run with: `RUST_LOG=debug cargo run --example headless_viewer [model.glb]`

use glam::Vec3;
use serde_json::json;

use watch_viewer::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

/// Counts frames and logs a scene summary once per second.
#[derive(Default)]
struct LogSurface {
    frames: u64,
    size: (u32, u32),
}

impl RenderSurface for LogSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        log::info!("Surface resized to {width}x{height}");
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            let meshes = scene.nodes.values().filter(|n| n.mesh.is_some()).count();
            log::info!(
                "frame {}: {} meshes, aspect {:.3}, camera fov {:.1}",
                self.frames,
                meshes,
                camera.aspect,
                camera.fov_degrees()
            );
        }
    }
}

/// Node tree with the same names as the real watch, used when the asset is
/// missing.
fn stand_in_model() -> anyhow::Result<ModelDocument> {
    let part = |name: &str, x: f32| {
        json!({
            "name": name,
            "translation": [x, 0.0, 0.0],
            "mesh": 0
        })
    };
    let gltf = json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "Watch", "children": [1, 2, 3, 4, 5] },
            part("Puterputer", 0.0),
            part("Tombol", 0.6),
            part("Mekanik1", -0.3),
            part("Mekanik2", 0.0),
            part("Mekanik3", 0.3)
        ],
        "meshes": [{ "name": "Part", "primitives": [{ "attributes": { "POSITION": 0 } }] }]
    });
    Ok(ModelDocument::from_gltf_slice(&serde_json::to_vec(&gltf)?, "stand-in")?)
}

fn run_frames(viewer: &mut Viewer, surface: &mut LogSurface, seconds: f32) {
    let frames = (seconds / FRAME).ceil() as u32;
    for _ in 0..frames {
        viewer.tick(FRAME, surface);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::default();
    let mut viewer = Viewer::new(config.clone());
    let mut surface = LogSurface::default();
    viewer.resize(1280, 720, &mut surface);

    let source = match std::env::args().nth(1) {
        Some(arg) => AssetSource::parse(&arg)?,
        None => AssetServer::new().with_root(config.asset_root.clone()).resolve(&config.model_file)?,
    };

    let loaded = match &source {
        AssetSource::Path(path) if !path.exists() => {
            log::warn!("{} not found; using a stand-in model", path.display());
            false
        }
        _ => {
            viewer.watch(AssetServer::new().load_model_from(source.clone()));
            while viewer.is_loading() {
                viewer.tick(FRAME, &mut surface);
                std::thread::sleep(std::time::Duration::from_millis(5));
            }
            viewer.registry_state().is_ready()
        }
    };
    if !loaded {
        viewer.install_model(&stand_in_model()?);
    }

    log::info!("Status visible: {}", viewer.status_visible());

    let controls: Vec<String> = config.triggers.iter().map(|b| b.control.clone()).collect();
    for control in &controls {
        let outcome = viewer.click(control);
        log::info!("{control}: {outcome:?}");
        run_frames(&mut viewer, &mut surface, 0.6);
    }

    for (control, value) in [("light-x", "1.5"), ("light-y", "2.0"), ("light-z", "-3.0")] {
        viewer.input(control, value);
    }
    run_frames(&mut viewer, &mut surface, 0.1);

    let light = viewer.light_position();
    log::info!("Light at {light}");
    assert_eq!(light, Vec3::new(1.5, 2.0, -3.0));

    if let Some(registry) = viewer.registry() {
        for (part, handle) in registry.iter() {
            if let Some(node) = viewer.scene().get_node(handle) {
                log::info!(
                    "{part}: position {} rotation {}",
                    node.transform.position,
                    node.transform.rotation
                );
            }
        }
    }

    log::info!("Rendered {} frames at {:?}", surface.frames, surface.size);
    Ok(())
}
