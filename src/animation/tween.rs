use glam::Vec3;

use crate::animation::easing::Ease;
use crate::animation::request::{AnimationRequest, PropertyPath, TweenValue};
use crate::animation::values::Blend;
use crate::scene::NodeHandle;

/// Identifies a submitted tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub(crate) u64);

/// An in-flight tween: a request with its start value and playback clock.
#[derive(Debug, Clone)]
pub struct Tween {
    id: TweenId,
    target: NodeHandle,
    property: PropertyPath,
    from: TweenValue,
    to: TweenValue,

    pub duration: f32,
    pub ease: Ease,
    pub repeat: u32,
    pub yoyo: bool,

    elapsed: f32,
}

impl Tween {
    /// Starts a tween from `from` toward the request's target value.
    #[must_use]
    pub fn new(id: TweenId, request: &AnimationRequest, from: TweenValue) -> Self {
        Self {
            id,
            target: request.target,
            property: request.property.path(),
            from,
            to: request.property.value(),
            duration: request.duration.max(0.0),
            ease: request.ease,
            repeat: request.repeat,
            yoyo: request.yoyo,
            elapsed: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> TweenId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> NodeHandle {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn property(&self) -> PropertyPath {
        self.property
    }

    #[inline]
    #[must_use]
    pub fn start_value(&self) -> TweenValue {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn end_value(&self) -> TweenValue {
        self.to
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Length of all passes together.
    #[must_use]
    pub fn total_duration(&self) -> f32 {
        self.duration * (self.repeat as f32 + 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    /// Advances the clock. Returns `true` once the tween has completed.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.total_duration());
        self.is_finished()
    }

    /// Eased progress from `from` (0) to `to` (1) at the current time.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.duration <= 0.0 || self.is_finished() {
            return self.end_ratio();
        }

        let cycle = (self.elapsed / self.duration).floor();
        let local = (self.elapsed - cycle * self.duration) / self.duration;
        let reversed = self.yoyo && (cycle as u32) % 2 == 1;
        let t = if reversed { 1.0 - local } else { local };

        self.ease.apply(t)
    }

    /// A yoyo with an odd number of repeats ends back where it started.
    fn end_ratio(&self) -> f32 {
        if self.yoyo && self.repeat % 2 == 1 {
            0.0
        } else {
            1.0
        }
    }

    /// Current value of the animated property.
    #[must_use]
    pub fn value(&self) -> TweenValue {
        let ratio = self.ratio();
        // Endpoints are returned untouched so that completed tweens land
        // exactly on their start or end value.
        if ratio <= 0.0 {
            return self.from;
        }
        if ratio >= 1.0 {
            return self.to;
        }

        match (self.from, self.to) {
            (TweenValue::Scalar(a), TweenValue::Scalar(b)) => {
                TweenValue::Scalar(f32::blend(a, b, ratio))
            }
            (TweenValue::Vector(a), TweenValue::Vector(b)) => {
                TweenValue::Vector(Vec3::blend(a, b, ratio))
            }
            _ => self.to,
        }
    }
}
