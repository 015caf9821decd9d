//! Browser binding
//!
//! Exposes [`WebViewer`] to JavaScript. The page forwards DOM events to it and
//! calls `frame()` from `requestAnimationFrame`; drawing is done by a JS
//! callback that receives the camera and the world matrix of every mesh node.

use js_sys::{Array, Float32Array, Function};
use wasm_bindgen::prelude::*;

use crate::config::ViewerConfig;
use crate::errors::ViewerError;
use crate::scene::{Camera, Scene};
use crate::utils::{FrameClock, PointerButton};
use crate::viewer::{RenderSurface, Viewer};

/// DOM wheel deltas arrive in pixels; one notch is about this many.
const WHEEL_NOTCH: f32 = 100.0;

#[wasm_bindgen(start)]
pub fn start() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Render surface backed by JS callbacks.
struct JsSurface {
    on_render: Function,
    on_resize: Option<Function>,
}

impl JsSurface {
    fn report(result: Result<JsValue, JsValue>) {
        if let Err(e) = result {
            log::error!("{}", ViewerError::WasmError(format!("{e:?}")));
        }
    }
}

impl RenderSurface for JsSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if let Some(callback) = &self.on_resize {
            Self::report(callback.call2(
                &JsValue::NULL,
                &JsValue::from(width),
                &JsValue::from(height),
            ));
        }
    }

    /// Calls `on_render(viewProjection, names, matrices)`, where `matrices`
    /// packs one column-major 4×4 matrix per entry of `names`.
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        let view_projection = Float32Array::from(&camera.view_projection_matrix().to_cols_array()[..]);

        let names = Array::new();
        let mut matrices = Vec::new();
        scene.traverse_roots(|_, node| {
            if node.mesh.is_some() && node.visible {
                names.push(&JsValue::from_str(&node.name));
                matrices.extend_from_slice(&node.transform.world_matrix_as_mat4().to_cols_array());
            }
        });

        Self::report(self.on_render.call3(
            &JsValue::NULL,
            &view_projection,
            &names,
            &Float32Array::from(&matrices[..]),
        ));
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
    surface: JsSurface,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebViewer {
    /// `config_json` may be empty or `undefined` for the default watch page.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        on_render: Function,
        on_resize: Option<Function>,
    ) -> Result<WebViewer, JsValue> {
        let config = match config_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => ViewerConfig::from_json_str(json).map_err(to_js)?,
            _ => ViewerConfig::default(),
        };

        let mut viewer = Viewer::new(config);
        viewer.start_loading().map_err(to_js)?;

        Ok(WebViewer {
            viewer,
            surface: JsSurface { on_render, on_resize },
            clock: FrameClock::new(),
        })
    }

    /// Returns `true` when the click started an animation.
    pub fn click(&mut self, control: &str) -> bool {
        matches!(
            self.viewer.click(control),
            crate::parts::TriggerOutcome::Submitted(_)
        )
    }

    /// Returns `true` when the value moved the light.
    pub fn input(&mut self, control: &str, value: &str) -> bool {
        self.viewer.input(control, value)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewer.resize(width, height, &mut self.surface);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.viewer.input_mut().handle_pointer_move(x, y);
    }

    pub fn pointer_down(&mut self, button: i16) {
        if let Some(button) = PointerButton::from_dom(button) {
            self.viewer.input_mut().handle_pointer_button(button, true);
        }
    }

    pub fn pointer_up(&mut self, button: i16) {
        if let Some(button) = PointerButton::from_dom(button) {
            self.viewer.input_mut().handle_pointer_button(button, false);
        }
    }

    /// DOM `WheelEvent` deltas; scrolling down zooms out.
    pub fn wheel(&mut self, delta_x: f32, delta_y: f32) {
        self.viewer
            .input_mut()
            .handle_wheel(-delta_x / WHEEL_NOTCH, -delta_y / WHEEL_NOTCH);
    }

    /// Advances and renders one frame.
    pub fn frame(&mut self) {
        let dt = self.clock.tick();
        self.viewer.tick(dt, &mut self.surface);
    }

    #[wasm_bindgen(getter)]
    pub fn status_text(&self) -> String {
        self.viewer.status_text().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn status_visible(&self) -> bool {
        self.viewer.status_visible()
    }
}

fn to_js(err: ViewerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
