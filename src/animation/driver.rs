use crate::animation::request::AnimationRequest;
use crate::animation::tween::{Tween, TweenId};
use crate::scene::{NodeHandle, Scene};

/// Plays tweens against scene nodes.
///
/// Tweens are applied in submission order every update, so when several of
/// them drive the same property the most recently submitted one wins. A new
/// request never cancels an older one.
#[derive(Debug, Default)]
pub struct AnimationDriver {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl AnimationDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a tween from the property's current value. Returns `None` when
    /// the target node no longer exists.
    pub fn submit(&mut self, request: &AnimationRequest, scene: &Scene) -> Option<TweenId> {
        let node = scene.get_node(request.target)?;
        let from = request.property.path().read(&node.transform);

        let id = TweenId(self.next_id);
        self.next_id += 1;

        log::trace!(
            "tween {:?}: {:?} {:?} -> {:?} over {}s ({})",
            id,
            request.property.path(),
            from,
            request.property.value(),
            request.duration,
            request.ease
        );
        self.tweens.push(Tween::new(id, request, from));
        Some(id)
    }

    /// Advances every tween by `dt` seconds and writes the resulting values
    /// into the scene. Completed tweens write their final value once and are
    /// dropped; tweens whose node has disappeared are dropped silently.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        self.tweens.retain_mut(|tween| {
            let finished = tween.advance(dt);

            let Some(transform) = scene.transform_mut(tween.target()) else {
                return false;
            };
            tween.property().write(transform, tween.value());

            !finished
        });
    }

    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    #[must_use]
    pub fn is_animating(&self, target: NodeHandle) -> bool {
        self.tweens.iter().any(|t| t.target() == target)
    }

    #[must_use]
    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.iter().find(|t| t.id() == id)
    }
}
