use std::time::Duration;

/// Most ticks a single update may emit; anything beyond is dropped so a
/// stalled window does not fast-forward the simulation.
pub const MAX_CATCH_UP: u32 = 4;

/// Turns elapsed frame time into whole simulation ticks at a fixed rate.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    pending: Duration,
}

impl FrameClock {
    /// `fps` must be non-zero; options validation guarantees it.
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            pending: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks due after `elapsed` more time has passed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let interval = self.interval.as_nanos().max(1);
        let due = self.pending.as_nanos() / interval;
        if due > u128::from(MAX_CATCH_UP) {
            self.pending = Duration::ZERO;
            return MAX_CATCH_UP;
        }
        // At most MAX_CATCH_UP here, so the cast cannot truncate.
        let due = due as u32;
        self.pending -= self.interval * due;
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = FrameClock::new(50);
        assert_eq!(clock.advance(Duration::from_millis(15)), 0);
        assert_eq!(clock.advance(Duration::from_millis(15)), 1);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
    }

    #[test]
    fn one_tick_per_interval() {
        let mut clock = FrameClock::new(60);
        let ticks: u32 = (0..60).map(|_| clock.advance(clock.interval())).sum();
        assert_eq!(ticks, 60);
    }

    #[test]
    fn highest_frame_rate_still_returns() {
        let mut clock = FrameClock::new(u32::MAX);
        assert_eq!(clock.interval(), Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(16)), MAX_CATCH_UP);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = FrameClock::new(60);
        assert_eq!(clock.advance(Duration::from_secs(2)), MAX_CATCH_UP);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }
}
