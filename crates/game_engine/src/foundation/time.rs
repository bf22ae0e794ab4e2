//! Time management utilities

use std::time::{Duration, Instant};

/// Fixed-timestep frame clock
///
/// Each call to [`FrameClock::tick`] waits out whatever is left of the frame
/// budget and then reports the time since the previous tick.
pub struct FrameClock {
    frame_budget: Duration,
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock targeting `target_fps` frames per second
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            frame_budget: Self::budget_for(target_fps),
            started: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Milliseconds allotted to a single frame
    pub fn budget_for(target_fps: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(target_fps.max(1)))
    }

    /// Sleep until the frame budget is used up, then advance the clock
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_budget {
            std::thread::sleep(self.frame_budget - elapsed);
        }

        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Time between the two most recent ticks, in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Milliseconds since the clock was created
    pub fn ticks_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Number of completed ticks
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frame budget this clock enforces
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_matches_target_fps() {
        assert_eq!(FrameClock::budget_for(60), Duration::from_millis(16));
        assert_eq!(FrameClock::budget_for(0), Duration::from_millis(1000));
    }

    #[test]
    fn test_tick_waits_out_budget() {
        let mut clock = FrameClock::new(100);
        let delta = clock.tick();
        assert!(delta >= 0.009);
        assert_eq!(clock.frame_count(), 1);
    }
}
