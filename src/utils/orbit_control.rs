use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use crate::config::OrbitConfig;
use crate::scene::Transform;
use crate::utils::input::{Input, PointerButton};

/// Keeps `phi` off the poles, where `look_at` has no defined up vector.
const POLE_MARGIN: f32 = 1e-4;
/// Damping factors are tuned per frame at this rate.
const REFERENCE_FPS: f32 = 60.0;

/// Camera orbit around a target point.
///
/// The camera sits on a sphere: `radius` from `target`, `theta` around +Y
/// starting at +Z, and `phi` down from +Y. Dragging with the primary button
/// turns it, the wheel moves it in and out, and a secondary drag slides the
/// target when panning is on.
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub auto_rotate: bool,
    /// Turns per minute while `auto_rotate` is on.
    pub auto_rotate_speed: f32,

    pub target: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    /// Rotation still owed to the camera; drained gradually when damping.
    momentum: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(target: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            enable_zoom: true,
            enable_pan: true,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            target,
            radius,
            theta: 0.0,
            phi: FRAC_PI_2,
            momentum: Vec2::ZERO,
        }
    }

    /// Orbit around `config.target` that starts with the camera at
    /// `position`, pulled inside the configured limits.
    #[must_use]
    pub fn from_config(position: Vec3, config: &OrbitConfig) -> Self {
        let mut controls = Self {
            enable_damping: config.enable_damping,
            damping_factor: config.damping_factor,
            enable_pan: config.enable_pan,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar_angle: config.min_polar_angle,
            max_polar_angle: config.max_polar_angle,
            auto_rotate: config.auto_rotate,
            ..Self::new(config.target, 1.0)
        };
        controls.set_position(position);
        controls.clamp_to_limits();
        controls
    }

    /// Moves the camera to `position` without changing the target.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.radius = offset.length();
        if self.radius > f32::EPSILON {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.target + self.radius * self.direction()
    }

    /// Unit vector from the target towards the camera.
    fn direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    fn clamp_to_limits(&mut self) {
        let lowest = self.min_polar_angle.max(POLE_MARGIN);
        let highest = self.max_polar_angle.min(PI - POLE_MARGIN).max(lowest);
        self.phi = self.phi.clamp(lowest, highest);
        self.radius = self.radius.clamp(self.min_distance, self.max_distance.max(self.min_distance));
    }

    /// Applies this frame's pointer input and writes the camera transform.
    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_radians: f32, dt: f32) {
        let viewport_height = input.screen_size.y.max(1.0);

        if input.is_button_pressed(PointerButton::Primary) {
            self.momentum -= input.cursor_delta * (TAU / viewport_height) * self.rotate_speed;
        }
        if self.auto_rotate {
            self.momentum.x -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }
        self.spend_momentum(dt);

        if self.enable_zoom {
            self.zoom(input.scroll_delta.y);
        }
        if self.enable_pan && input.is_button_pressed(PointerButton::Secondary) {
            self.pan(input.cursor_delta, fov_radians, viewport_height);
        }

        self.clamp_to_limits();
        transform.position = self.position();
        transform.look_at(self.target, Vec3::Y);
    }

    fn spend_momentum(&mut self, dt: f32) {
        let spent = if self.enable_damping {
            let kept = (1.0 - self.damping_factor).powf(dt * REFERENCE_FPS);
            let spent = self.momentum * (1.0 - kept);
            self.momentum *= kept;
            spent
        } else {
            std::mem::take(&mut self.momentum)
        };
        self.theta += spent.x;
        self.phi += spent.y;
    }

    /// Positive notches move closer.
    fn zoom(&mut self, notches: f32) {
        if notches == 0.0 {
            return;
        }
        let step = (1.0 - self.zoom_speed).powf(notches.abs());
        self.radius = if notches > 0.0 { self.radius * step } else { self.radius / step };
    }

    fn pan(&mut self, cursor_delta: Vec2, fov_radians: f32, viewport_height: f32) {
        let world_per_pixel = 2.0 * self.radius * (fov_radians * 0.5).tan() / viewport_height;
        let forward = -self.direction();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        self.target += (up * cursor_delta.y - right * cursor_delta.x) * world_per_pixel * self.pan_speed;
    }
}
