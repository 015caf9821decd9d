//! Viewer context
//!
//! [`Viewer`] owns everything a viewing session needs: the scene, the part
//! registry, the animation driver and the camera controls. The host drives it
//! with UI events ([`Viewer::click`], [`Viewer::input`], [`Viewer::resize`])
//! and one [`Viewer::tick`] per display refresh. Drawing is delegated to a
//! [`RenderSurface`].

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::animation::AnimationDriver;
use crate::assets::{AssetServer, LoadEvent, LoadProgress, ModelDocument, PendingModel};
use crate::config::ViewerConfig;
use crate::errors::Result;
use crate::parts::{LightPositionBinding, PartRegistry, RegistryState, TriggerMap, TriggerOutcome};
use crate::scene::light::color_from_hex;
use crate::scene::{Camera, Mesh, Node, NodeHandle, Scene, SpotLight};
use crate::utils::{FpsCounter, Input, OrbitControls};

/// Where frames end up.
///
/// The viewer never draws by itself. Implementations own the GPU (or canvas,
/// or test recorder) and receive the scene once per tick.
pub trait RenderSurface {
    /// Called synchronously from [`Viewer::resize`].
    fn resize(&mut self, width: u32, height: u32);

    /// Draws one frame. World matrices are up to date.
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

pub struct Viewer {
    config: ViewerConfig,

    scene: Scene,
    driver: AnimationDriver,
    controls: OrbitControls,
    input: Input,

    triggers: TriggerMap,
    light_binding: LightPositionBinding,

    camera_node: NodeHandle,
    light_node: NodeHandle,
    ground_node: NodeHandle,
    model_root: Option<NodeHandle>,

    registry: RegistryState,
    pending: Option<PendingModel>,

    status_text: String,
    status_visible: bool,

    fps: FpsCounter,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl Viewer {
    /// Builds the static scene (camera, spotlight, ground) described by
    /// `config`. The model is not loaded until [`Viewer::start_loading`].
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let mut scene = Scene::new();
        scene.background = color_from_hex(config.clear_color);
        scene.shadows_enabled = config.shadows;

        let camera_node = {
            let mut node = Node::with_name("camera");
            node.transform.position = config.camera.position;
            node.transform.look_at(config.orbit.target, Vec3::Y);
            let handle = scene.add_node(node);
            scene.set_camera(
                handle,
                Camera::new_perspective(config.camera.fov, 1.0, config.camera.near, config.camera.far),
            );
            scene.active_camera = Some(handle);
            handle
        };

        let light_node = {
            let spot = &config.spotlight;
            let mut node = Node::with_name("spotlight");
            node.transform.position = spot.position;
            node.transform.look_at(Vec3::ZERO, Vec3::Y);
            let handle = scene.add_node(node);

            let mut light = SpotLight::new(
                color_from_hex(spot.color),
                spot.intensity,
                spot.range,
                spot.angle,
                spot.penumbra,
            );
            light.cast_shadows = spot.cast_shadows;
            light.shadow.bias = spot.shadow_bias;
            scene.set_light(handle, light);
            handle
        };

        let ground_node = {
            let mut node = Node::with_name("ground");
            node.transform.rotation.x = -FRAC_PI_2;
            let handle = scene.add_node(node);
            let mesh = scene.add_mesh(Mesh::plane(config.ground.size, color_from_hex(config.ground.color)));
            scene.set_mesh(handle, mesh);
            handle
        };

        scene.update_matrix_world();

        let controls = OrbitControls::from_config(config.camera.position, &config.orbit);
        let triggers = TriggerMap::new(config.triggers.iter().cloned());
        let light_binding = config.sliders.controls.clone();
        let registry = RegistryState::default();
        let status_text = LoadProgress::default().status_text();

        Self {
            config,
            scene,
            driver: AnimationDriver::new(),
            controls,
            input: Input::new(),
            triggers,
            light_binding,
            camera_node,
            light_node,
            ground_node,
            model_root: None,
            registry,
            pending: None,
            status_text,
            status_visible: true,
            fps: FpsCounter::new(),
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Starts the model load configured in `asset_root` / `model_file`.
    pub fn start_loading(&mut self) -> Result<()> {
        let server = AssetServer::new().with_root(self.config.asset_root.clone());
        let pending = server.load_model(&self.config.model_file)?;
        self.watch(pending);
        Ok(())
    }

    /// Tracks a load started elsewhere. Events are consumed by [`Viewer::tick`].
    pub fn watch(&mut self, pending: PendingModel) {
        if self.pending.is_some() {
            log::warn!("Replacing a model load that has not finished");
        }
        self.pending = Some(pending);
    }

    /// Drains every event the pending load has produced so far.
    pub fn poll_loading(&mut self) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        while let Some(event) = pending.poll() {
            match event {
                LoadEvent::Progress(progress) => {
                    self.status_text = progress.status_text();
                    if matches!(self.registry, RegistryState::Loading(_)) {
                        self.registry = RegistryState::Loading(progress);
                    }
                }
                LoadEvent::Loaded(document) => self.install_model(&document),
                LoadEvent::Failed(err) => {
                    log::error!("Model {} failed to load: {err}", pending.source());
                    self.registry = RegistryState::Failed(err.to_string());
                }
            }
        }
        if !pending.is_finished() {
            self.pending = Some(pending);
        }
    }

    /// Adds the model to the scene at the configured offset, resolves the
    /// part registry and hides the status line.
    pub fn install_model(&mut self, document: &ModelDocument) {
        if let Some(old) = self.model_root {
            log::warn!("Replacing the installed model");
            self.scene.remove_subtree(old);
        }

        let root = document.instantiate(&mut self.scene);
        if let Some(transform) = self.scene.transform_mut(root) {
            transform.position = self.config.model_offset;
        }
        self.scene.add_root(root);
        self.model_root = Some(root);

        let registry = PartRegistry::populate(&mut self.scene, root, &self.config.parts, self.config.tie_break);
        for (part, handle) in registry.iter() {
            log::debug!("{part} -> {:?}", self.scene.get_name(handle).unwrap_or_default());
        }
        self.registry = RegistryState::Ready(registry);
        self.status_visible = false;
        self.scene.update_matrix_world();
    }

    // ========================================================================
    // UI events
    // ========================================================================

    /// Handles a click on control `control`.
    pub fn click(&mut self, control: &str) -> TriggerOutcome {
        let outcome = self
            .triggers
            .fire(control, self.registry.registry(), &self.scene, &mut self.driver);
        log::debug!("{control}: {outcome:?}");
        outcome
    }

    /// Handles a slider change. Returns whether the light moved.
    pub fn input(&mut self, control: &str, raw: &str) -> bool {
        match self
            .light_binding
            .apply(control, raw, &mut self.scene, self.light_node)
        {
            Ok(moved) => moved,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Matches the camera and surface to a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32, surface: &mut impl RenderSurface) {
        if let Some(camera) = self.scene.cameras.get_mut(self.camera_node) {
            if height > 0 {
                camera.aspect = width as f32 / height as f32;
            }
            camera.update_projection_matrix();
        }
        surface.resize(width, height);
        self.input.handle_resize(width, height);
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Runs one frame of `dt` seconds and renders it.
    pub fn tick(&mut self, dt: f32, surface: &mut impl RenderSurface) {
        self.poll_loading();

        if let Some((transform, camera)) = self.scene.main_camera_mut() {
            self.controls.update(transform, &self.input, camera.fov, dt);
        }

        self.driver.update(dt, &mut self.scene);

        if let Some(transform) = self.scene.transform_mut(self.light_node) {
            transform.look_at(Vec3::ZERO, Vec3::Y);
        }

        self.scene.update_matrix_world();

        if let Some(camera) = self.scene.cameras.get(self.camera_node) {
            surface.render(&self.scene, camera);
        }

        self.input.end_frame();

        if let Some(fps) = self.fps.update(dt) {
            log::debug!("{fps:.1} fps");
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    #[must_use]
    pub fn input_state(&self) -> &Input {
        &self.input
    }

    /// Pointer state fed by the host; consumed by the orbit controls on tick.
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    #[must_use]
    pub fn triggers(&self) -> &TriggerMap {
        &self.triggers
    }

    #[must_use]
    pub fn registry_state(&self) -> &RegistryState {
        &self.registry
    }

    #[must_use]
    pub fn registry(&self) -> Option<&PartRegistry> {
        self.registry.registry()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    #[must_use]
    pub fn status_visible(&self) -> bool {
        self.status_visible
    }

    #[must_use]
    pub fn camera_node(&self) -> NodeHandle {
        self.camera_node
    }

    #[must_use]
    pub fn camera(&self) -> Option<&Camera> {
        self.scene.cameras.get(self.camera_node)
    }

    #[must_use]
    pub fn light_node(&self) -> NodeHandle {
        self.light_node
    }

    #[must_use]
    pub fn light_position(&self) -> Vec3 {
        self.scene
            .get_node(self.light_node)
            .map_or(Vec3::ZERO, |node| node.transform.position)
    }

    #[must_use]
    pub fn ground_node(&self) -> NodeHandle {
        self.ground_node
    }

    #[must_use]
    pub fn model_root(&self) -> Option<NodeHandle> {
        self.model_root
    }
}
