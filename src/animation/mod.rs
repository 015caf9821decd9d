//! Animation driver
//!
//! Tween-based property animation for scene nodes: a caller builds an
//! [`AnimationRequest`], the [`AnimationDriver`] turns it into a [`Tween`]
//! and advances it every frame.

pub mod driver;
pub mod easing;
pub mod request;
pub mod tween;
pub mod values;

pub use driver::AnimationDriver;
pub use easing::Ease;
pub use request::{AnimationRequest, PropertyPath, PropertyTarget, TweenValue};
pub use tween::{Tween, TweenId};
