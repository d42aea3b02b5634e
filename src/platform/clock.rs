//! Fixed timestep frame clock
//!
//! Display refresh rates vary, the simulation constants do not. The clock
//! turns wall-clock frame deltas into whole simulation steps.

use crate::consts::MAX_SUBSTEPS;

/// Longest frame delta accepted (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per simulation step
    step_dt: f32,
    accumulator: f32,
    /// Timestamp of the previous frame (ms), if any
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(tick_rate: f32) -> Self {
        Self {
            step_dt: 1.0 / tick_rate,
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Feed a frame timestamp (ms, e.g. from requestAnimationFrame) and get
    /// the number of steps to run this frame
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            // First frame runs exactly one step
            None => self.step_dt,
        };
        self.last_time_ms = Some(time_ms);
        self.advance(dt)
    }

    /// Add `dt` seconds and return the number of whole steps due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step_dt && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step_dt;
            steps += 1;
        }
        // Drop backlog we refused to simulate
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step_dt);
        }
        steps
    }

    /// Forget timing history (after pauses and mode switches)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}
