#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Gaps longer than this (a hidden tab, a debugger pause) are not replayed.
pub const LAG_THRESHOLD: Duration = Duration::from_millis(500);
/// What such a gap counts as instead.
pub const LAG_STEP: Duration = Duration::from_millis(33);

/// Measures the time between display refreshes.
///
/// The scheduler (`requestAnimationFrame`, a native event loop) decides the
/// cadence; the clock only reports it. The first tick reports zero.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_tick: Option<Instant>,
    /// Sum of all reported deltas.
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let mut delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        if delta > LAG_THRESHOLD {
            log::debug!("Frame gap of {delta:?} smoothed to {LAG_STEP:?}");
            delta = LAG_STEP;
        }

        self.last_tick = Some(now);
        self.elapsed += delta;
        self.frame_count += 1;
        delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_the_gap_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_at(start), 0.0);

        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(clock.frame_count, 2);
    }

    #[test]
    fn long_gaps_count_as_one_short_frame() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.tick_at(start);

        let dt = clock.tick_at(start + Duration::from_secs(30));
        assert!((dt - LAG_STEP.as_secs_f32()).abs() < 1e-6);
        assert_eq!(clock.elapsed, LAG_STEP);
    }
}
