#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Interactive wristwatch viewer.
//!
//! Loads a glTF model of a watch, resolves its movable parts by node name,
//! and animates them in response to UI controls while the camera orbits and
//! a spotlight follows three sliders.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use watch_viewer::prelude::*;
//!
//! let mut viewer = Viewer::new(ViewerConfig::default());
//! viewer.start_loading()?;
//! viewer.resize(1280, 720, &mut surface);
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     viewer.tick(clock.tick(), &mut surface);
//! }
//! ```
//!
//! # Modules
//!
//! - [`scene`]: node arena, transforms, camera, spotlight
//! - [`animation`]: eased property tweens
//! - [`assets`]: background model loading and glTF parsing
//! - [`parts`]: part registry, trigger map, light slider binding
//! - [`viewer`]: the session context and the frame loop

pub mod animation;
pub mod assets;
pub mod config;
pub mod errors;
pub mod parts;
pub mod scene;
pub mod utils;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::ViewerConfig;
pub use errors::{Result, ViewerError};
pub use viewer::{RenderSurface, Viewer};

pub mod prelude {
    pub use crate::animation::{AnimationDriver, AnimationRequest, Ease, PropertyTarget};
    pub use crate::assets::{AssetServer, AssetSource, LoadEvent, LoadProgress, ModelDocument};
    pub use crate::config::ViewerConfig;
    pub use crate::errors::{Result, ViewerError};
    pub use crate::parts::{PartKey, PartRegistry, PartTable, RegistryState, TieBreak, TriggerOutcome};
    pub use crate::scene::{Axis, Camera, NodeHandle, Scene, Transform};
    pub use crate::utils::{FrameClock, Input, OrbitControls, PointerButton};
    pub use crate::viewer::{RenderSurface, Viewer};
}
