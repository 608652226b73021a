//! Frame pacing
//!
//! Turns display-refresh callbacks into a number of simulation steps. In
//! `Fixed` mode wall-clock time is accumulated and consumed in whole logical
//! steps, so game speed no longer depends on the monitor's refresh rate.

use crate::config::{StepMode, TimingConfig};

#[derive(Debug, Clone)]
pub struct FrameDriver {
    timing: TimingConfig,
    accumulator: f32,
    /// Timestamp (ms) of the previous frame; None after start or resume
    last_time: Option<f64>,
}

impl FrameDriver {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Duration of one logical step in seconds
    pub fn step_duration(&self) -> f32 {
        1.0 / self.timing.steps_per_second
    }

    pub fn mode(&self) -> StepMode {
        self.timing.mode
    }

    /// Number of steps to run for a frame shown at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        if self.timing.mode == StepMode::PerFrame {
            self.last_time = Some(now_ms);
            return 1;
        }

        let step = self.step_duration();
        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).max(0.0),
            None => step,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt.min(self.timing.max_frame_delta);

        let mut steps = 0;
        while self.accumulator >= step && steps < self.timing.max_substeps {
            self.accumulator -= step;
            steps += 1;
        }
        if steps == self.timing.max_substeps && self.accumulator >= step {
            log::trace!("Frame hit the substep cap, {:.3}s behind", self.accumulator);
        }
        steps
    }

    /// Forget the previous timestamp so the next frame starts fresh (after
    /// the loop was parked or the tab was hidden)
    pub fn resume(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }
}
