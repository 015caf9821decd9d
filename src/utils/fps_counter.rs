/// Averages frame rate over one-second windows.
#[derive(Debug, Default)]
pub struct FpsCounter {
    frame_count: u32,
    accumulated: f32,
    pub current_fps: f32,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame of `dt` seconds. Returns the new average whenever a
    /// full second has accumulated.
    pub fn update(&mut self, dt: f32) -> Option<f32> {
        self.frame_count += 1;
        self.accumulated += dt;

        if self.accumulated >= 1.0 {
            self.current_fps = self.frame_count as f32 / self.accumulated;
            self.accumulated = 0.0;
            self.frame_count = 0;
            return Some(self.current_fps);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let mut fps = FpsCounter::new();
        for _ in 0..59 {
            assert!(fps.update(1.0 / 60.0).is_none());
        }
        let reported = fps.update(1.0 / 60.0 + 0.001).unwrap();
        assert!((reported - 60.0).abs() < 0.1);
    }
}
