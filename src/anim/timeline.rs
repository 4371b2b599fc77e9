//! Build, hold and unbuild timeline for the block logo.

use std::time::Duration;

pub const STEP_MS: u64 = 14;
pub const HOLD_MS: u64 = 900;
pub const BREATH_MS: u64 = 3400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTimeline {
    cells: usize,
    total: u64,
    build_ms: u64,
    cycle_ms: u64,
    elapsed_ms: u64,
}

impl BlockTimeline {
    pub fn new(cells: usize) -> Self {
        let total = cells.max(1) as u64;
        let build_ms = total * STEP_MS;
        Self {
            cells,
            total,
            build_ms,
            cycle_ms: build_ms + HOLD_MS + build_ms,
            elapsed_ms: 0,
        }
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn cycle_ms(&self) -> u64 {
        self.cycle_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn advance(&mut self, dt: Duration) {
        let cycle = self.cycle_ms.max(1);
        let dt = (dt.as_millis() % cycle as u128) as u64;
        self.elapsed_ms = (self.elapsed_ms + dt) % cycle;
    }

    /// Number of leading cells lit at the current time.
    pub fn active_count(&self) -> usize {
        let t = self.elapsed_ms;
        let raw = if t < self.build_ms {
            t / STEP_MS + 1
        } else if t - self.build_ms < HOLD_MS {
            self.total
        } else {
            let off = (t - self.build_ms - HOLD_MS) / STEP_MS + 1;
            self.total.saturating_sub(off)
        };
        (raw as usize).min(self.cells)
    }

    /// `[0, 1)` position inside the breathing period.
    pub fn breath_phase(&self) -> f32 {
        (self.elapsed_ms % BREATH_MS) as f32 / BREATH_MS as f32
    }

    /// Badge scale factor, 1.2 % peak.
    pub fn breath_scale(&self) -> f32 {
        1.0 + 0.012 * (std::f32::consts::TAU * self.breath_phase()).sin()
    }
}
