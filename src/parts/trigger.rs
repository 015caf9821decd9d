use std::f32::consts::{FRAC_1_SQRT_2, PI};

use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationDriver, AnimationRequest, Ease, PropertyTarget, TweenId};
use crate::parts::registry::{PartKey, PartRegistry};
use crate::scene::{Axis, NodeHandle, Scene, Transform};

/// One tenth of a turn.
pub const NUDGE_ANGLE: f32 = 36.0 * PI / 180.0;
pub const NUDGE_DURATION: f32 = 0.5;
pub const POP_DISTANCE: f32 = 0.1;

/// Animation shape a trigger produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerAction {
    /// Turn about `axis` by `angle` radians relative to the current angle.
    RotationalNudge {
        axis: Axis,
        angle: f32,
        duration: f32,
        ease: Ease,
    },
    /// Move to `P - normalize(direction) * distance` and back again.
    OutwardPop {
        direction: Vec3,
        distance: f32,
        duration: f32,
        ease: Ease,
    },
}

impl TriggerAction {
    #[must_use]
    pub fn nudge(axis: Axis) -> Self {
        TriggerAction::RotationalNudge {
            axis,
            angle: NUDGE_ANGLE,
            duration: NUDGE_DURATION,
            ease: Ease::POWER2_OUT,
        }
    }

    #[must_use]
    pub fn pop(direction: Vec3, duration: f32) -> Self {
        TriggerAction::OutwardPop {
            direction,
            distance: POP_DISTANCE,
            duration,
            ease: Ease::POWER2_OUT,
        }
    }

    /// Builds the request for `target`, relative to its transform right now.
    /// Repeated nudges therefore stack, even mid-animation.
    #[must_use]
    pub fn request(&self, target: NodeHandle, transform: &Transform) -> AnimationRequest {
        match *self {
            TriggerAction::RotationalNudge {
                axis,
                angle,
                duration,
                ease,
            } => {
                let radians = transform.rotation_about(axis) + angle;
                AnimationRequest::new(target, PropertyTarget::Rotation { axis, radians })
                    .with_duration(duration)
                    .with_ease(ease)
            }
            TriggerAction::OutwardPop {
                direction,
                distance,
                duration,
                ease,
            } => {
                let offset = direction.normalize_or_zero() * distance;
                AnimationRequest::new(target, PropertyTarget::Position(transform.position - offset))
                    .with_duration(duration)
                    .with_ease(ease)
                    .with_repeat(1)
                    .with_yoyo(true)
            }
        }
    }
}

/// Binds a UI control to an action on one part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerBinding {
    pub control: String,
    pub part: PartKey,
    pub action: TriggerAction,
}

impl TriggerBinding {
    #[must_use]
    pub fn new(control: impl Into<String>, part: PartKey, action: TriggerAction) -> Self {
        Self {
            control: control.into(),
            part,
            action,
        }
    }

    /// The five buttons of the wristwatch page.
    #[must_use]
    pub fn defaults() -> Vec<TriggerBinding> {
        vec![
            TriggerBinding::new("rotate-y-button", PartKey::Base, TriggerAction::nudge(Axis::Y)),
            TriggerBinding::new(
                "tombol-button",
                PartKey::Button,
                TriggerAction::pop(Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2), 0.3),
            ),
            TriggerBinding::new(
                "skrup1-button",
                PartKey::Mechanism1,
                TriggerAction::pop(Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2), 0.15),
            ),
            TriggerBinding::new("skrup2-button", PartKey::Mechanism2, TriggerAction::nudge(Axis::X)),
            TriggerBinding::new(
                "skrup3-button",
                PartKey::Mechanism3,
                TriggerAction::pop(Vec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2), 0.15),
            ),
        ]
    }
}

/// What happened when a control fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Submitted(TweenId),
    /// The model has not finished loading.
    NotReady,
    /// The model has no node for this part.
    PartAbsent(PartKey),
    UnknownControl,
}

/// Control id → binding lookup, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct TriggerMap {
    bindings: FxHashMap<String, TriggerBinding>,
}

impl TriggerMap {
    /// Builds the map. A control bound twice keeps its last binding.
    #[must_use]
    pub fn new(bindings: impl IntoIterator<Item = TriggerBinding>) -> Self {
        let mut map = FxHashMap::default();
        for binding in bindings {
            if let Some(old) = map.insert(binding.control.clone(), binding) {
                log::warn!("Control {:?} bound more than once; keeping the last binding", old.control);
            }
        }
        Self { bindings: map }
    }

    #[must_use]
    pub fn binding(&self, control: &str) -> Option<&TriggerBinding> {
        self.bindings.get(control)
    }

    pub fn controls(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Fires `control`. Nothing in the scene changes unless the outcome is
    /// [`TriggerOutcome::Submitted`].
    pub fn fire(
        &self,
        control: &str,
        registry: Option<&PartRegistry>,
        scene: &Scene,
        driver: &mut AnimationDriver,
    ) -> TriggerOutcome {
        let Some(binding) = self.bindings.get(control) else {
            return TriggerOutcome::UnknownControl;
        };
        let Some(registry) = registry else {
            return TriggerOutcome::NotReady;
        };
        let Some(target) = registry.get(binding.part) else {
            return TriggerOutcome::PartAbsent(binding.part);
        };
        let Some(node) = scene.get_node(target) else {
            return TriggerOutcome::PartAbsent(binding.part);
        };

        let request = binding.action.request(target, &node.transform);
        match driver.submit(&request, scene) {
            Some(id) => TriggerOutcome::Submitted(id),
            None => TriggerOutcome::PartAbsent(binding.part),
        }
    }
}
