use glam::Vec3;

use crate::animation::easing::Ease;
use crate::scene::{Axis, NodeHandle, Transform};

/// The transform property a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Position,
    Scale,
    /// One Euler angle of the rotation.
    Rotation(Axis),
}

/// A property value, either one scalar channel or a full vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Vector(Vec3),
}

impl PropertyPath {
    /// Reads the property's current value from a transform.
    #[must_use]
    pub fn read(self, transform: &Transform) -> TweenValue {
        match self {
            PropertyPath::Position => TweenValue::Vector(transform.position),
            PropertyPath::Scale => TweenValue::Vector(transform.scale),
            PropertyPath::Rotation(axis) => TweenValue::Scalar(transform.rotation_about(axis)),
        }
    }

    /// Writes `value` into the transform. A value of the wrong shape for this
    /// property is ignored.
    pub fn write(self, transform: &mut Transform, value: TweenValue) {
        match (self, value) {
            (PropertyPath::Position, TweenValue::Vector(v)) => transform.position = v,
            (PropertyPath::Scale, TweenValue::Vector(v)) => transform.scale = v,
            (PropertyPath::Rotation(axis), TweenValue::Scalar(s)) => {
                transform.set_rotation_about(axis, s);
            }
            _ => log::warn!("{self:?} cannot take {value:?}"),
        }
    }
}

/// End value of a tween, paired with the property it lands on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyTarget {
    Position(Vec3),
    Scale(Vec3),
    Rotation { axis: Axis, radians: f32 },
}

impl PropertyTarget {
    #[must_use]
    pub fn path(self) -> PropertyPath {
        match self {
            PropertyTarget::Position(_) => PropertyPath::Position,
            PropertyTarget::Scale(_) => PropertyPath::Scale,
            PropertyTarget::Rotation { axis, .. } => PropertyPath::Rotation(axis),
        }
    }

    #[must_use]
    pub fn value(self) -> TweenValue {
        match self {
            PropertyTarget::Position(v) | PropertyTarget::Scale(v) => TweenValue::Vector(v),
            PropertyTarget::Rotation { radians, .. } => TweenValue::Scalar(radians),
        }
    }
}

/// A one-shot request to animate a node property to an absolute value.
///
/// Requests are built per UI event and consumed by
/// [`AnimationDriver::submit`](crate::animation::AnimationDriver::submit).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub target: NodeHandle,
    pub property: PropertyTarget,
    /// Seconds for one forward pass.
    pub duration: f32,
    pub ease: Ease,
    /// Extra passes after the first one.
    pub repeat: u32,
    /// Alternate direction on every repeat.
    pub yoyo: bool,
}

impl AnimationRequest {
    #[must_use]
    pub fn new(target: NodeHandle, property: PropertyTarget) -> Self {
        Self {
            target,
            property,
            duration: 0.5,
            ease: Ease::default(),
            repeat: 0,
            yoyo: false,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    #[must_use]
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }
}
