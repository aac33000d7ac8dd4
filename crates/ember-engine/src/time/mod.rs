//! Frame timing for fixed-step matrix loops.

use std::time::{Duration, Instant};

/// Per-frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct Tick {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Monotonic frame counter.
    pub frame: u64,
}

/// Frame clock producing clamped [`Tick`] snapshots.
///
/// Delta time is capped so a debugger pause or long stall does not explode
/// whatever simulation consumes it.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame: u64,
    max_dt: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(Duration::from_millis(250))
    }

    pub fn with_max_dt(max_dt: Duration) -> Self {
        Self { last: Instant::now(), frame: 0, max_dt }
    }

    /// Resets the baseline, e.g. after resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the new snapshot.
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.max_dt);
        self.last = now;

        let tick = Tick { dt: dt.as_secs_f32(), frame: self.frame };
        self.frame = self.frame.wrapping_add(1);
        tick
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_count_up() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame, 0);
        assert_eq!(clock.tick().frame, 1);
        assert_eq!(clock.tick().frame, 2);
    }

    #[test]
    fn dt_is_clamped_to_max() {
        let mut clock = FrameClock::with_max_dt(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        let tick = clock.tick();
        assert!(tick.dt <= 0.001 + f32::EPSILON);
    }

    #[test]
    fn dt_is_never_negative() {
        let mut clock = FrameClock::new();
        assert!(clock.tick().dt >= 0.0);
    }
}
