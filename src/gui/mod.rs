pub mod itau;
pub mod matrix;
pub mod neon;
pub mod paint;
pub mod spinner;
pub mod window;

use std::time::{Duration, Instant};

/// Timer period of the frame loop.
pub const FRAME: Duration = Duration::from_millis(16);

/// Converts wall-clock time between repaints into whole `FRAME` ticks so
/// fixed-step animations keep their speed whatever the repaint rate.
#[derive(Debug)]
pub struct TickClock {
    last: Instant,
    carry: Duration,
}

impl TickClock {
    /// Catch-up cap after a stall (window drag, breakpoint).
    const MAX_TICKS: u32 = 30;

    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            carry: Duration::ZERO,
        }
    }

    pub fn ticks(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        self.split(elapsed)
    }

    fn split(&mut self, elapsed: Duration) -> u32 {
        let total = self.carry + elapsed;
        let n = (total.as_micros() / FRAME.as_micros()) as u32;
        self.carry = total - FRAME * n;
        if n > Self::MAX_TICKS {
            self.carry = Duration::ZERO;
            return Self::MAX_TICKS;
        }
        n
    }

    /// Wall time since the previous call, for variable-step animations.
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
