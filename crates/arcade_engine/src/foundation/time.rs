//! Time management utilities
//!
//! The engine runs headless, so time is advanced explicitly by the loop
//! instead of being sampled from the wall clock.

/// Frame clock tracking simulated time
#[derive(Debug, Clone)]
pub struct FrameClock {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FrameClock {
    /// Create a new clock that clamps single steps to `max_delta` seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta,
        }
    }

    /// Advance the clock by one frame and return the clamped delta
    pub fn tick(&mut self, delta_time: f32) -> f32 {
        let clamped = delta_time.clamp(0.0, self.max_delta);
        self.delta_time = clamped;
        self.total_time += clamped;
        self.frame_count += 1;
        clamped
    }

    /// Get the time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Upper bound on timer fires within one advance
const MAX_FIRES_PER_ADVANCE: u32 = 8;

/// Timer that fires every `interval` seconds
///
/// A single advance fires at most `MAX_FIRES_PER_ADVANCE` times; any backlog
/// beyond that is dropped.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: f32,
    elapsed: f32,
    pending_first: bool,
    running: bool,
}

impl RepeatingTimer {
    /// Create a timer whose first fire happens after one full interval
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
            pending_first: false,
            running: true,
        }
    }

    /// Fire once on the first advance, then every interval
    pub fn with_immediate_first_fire(mut self) -> Self {
        self.pending_first = true;
        self
    }

    /// Advance the timer and return how many times it fired
    pub fn advance(&mut self, delta_time: f32) -> u32 {
        if !self.running {
            return 0;
        }

        let mut fired = 0;
        if self.pending_first {
            self.pending_first = false;
            fired += 1;
        }

        self.elapsed += delta_time;
        while self.elapsed + 1e-5 >= self.interval {
            if fired >= MAX_FIRES_PER_ADVANCE {
                log::warn!("Timer fell behind by {:.3}s; dropping the backlog", self.elapsed);
                self.elapsed %= self.interval;
                break;
            }
            self.elapsed -= self.interval;
            fired += 1;
        }
        self.elapsed = self.elapsed.max(0.0);
        fired
    }

    /// Stop firing
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Check if the timer is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Interval in seconds
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_clamps_large_steps() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(1.0), 0.1);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_repeating_timer_fires_each_interval() {
        let mut timer = RepeatingTimer::new(1.0);
        let fires: u32 = (0..240).map(|_| timer.advance(1.0 / 60.0)).sum();
        assert_eq!(fires, 4);
    }

    #[test]
    fn test_immediate_first_fire() {
        let mut timer = RepeatingTimer::new(1.0).with_immediate_first_fire();
        assert_eq!(timer.advance(0.0), 1);
        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.5), 1);
    }

    #[test]
    fn test_fires_are_capped_per_advance() {
        let mut timer = RepeatingTimer::new(1e-6).with_immediate_first_fire();
        assert_eq!(timer.advance(1.0 / 60.0), MAX_FIRES_PER_ADVANCE);

        let mut timer = RepeatingTimer::new(0.1);
        assert_eq!(timer.advance(5.0), MAX_FIRES_PER_ADVANCE);
        assert!(timer.advance(0.0) <= 1);
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = RepeatingTimer::new(0.5);
        timer.stop();
        assert_eq!(timer.advance(10.0), 0);
        assert!(!timer.is_running());
    }
}
