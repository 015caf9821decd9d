//! Utility Module
//!
//! - [`OrbitControls`]: camera orbit controller
//! - [`Input`]: platform-agnostic pointer state
//! - [`FpsCounter`]: frame rate measurement
//! - [`FrameClock`]: frame delta measurement

pub mod fps_counter;
pub mod input;
pub mod orbit_control;
pub mod time;

pub use fps_counter::FpsCounter;
pub use input::{Input, PointerButton};
pub use orbit_control::OrbitControls;
pub use time::FrameClock;
