use glam::Vec3;

/// Property values a tween can blend. `ratio` is the eased progress and may
/// leave `0..=1` for overshooting curves.
pub trait Blend: Copy {
    fn blend(from: Self, to: Self, ratio: f32) -> Self;
}

impl Blend for f32 {
    #[inline]
    fn blend(from: Self, to: Self, ratio: f32) -> Self {
        from + (to - from) * ratio
    }
}

impl Blend for Vec3 {
    #[inline]
    fn blend(from: Self, to: Self, ratio: f32) -> Self {
        from + (to - from) * ratio
    }
}
