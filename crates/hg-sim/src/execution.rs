//! Execution managers decide how simulated time relates to wall time.

use std::thread;
use std::time::{Duration, Instant};

/// Hooks called by the driver around every step.
pub trait ExecutionManager {
    fn reset(&mut self) {}

    fn preprocess(&mut self) {}

    /// Called after a step of `delta_time` simulated seconds.
    fn postprocess(&mut self, _delta_time: f64) {}
}

/// Steps run as fast as possible.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

impl ExecutionManager for Unpaced {}

/// Paces steps so simulated time advances `speedup` times faster than the
/// wall clock. Steps that overrun are not compensated.
#[derive(Debug, Clone)]
pub struct RealTime {
    speedup: f64,
    step_started: Option<Instant>,
}

impl RealTime {
    /// Returns `None` unless `speedup` is finite and positive.
    pub fn new(speedup: f64) -> Option<Self> {
        (speedup.is_finite() && speedup > 0.0).then_some(Self {
            speedup,
            step_started: None,
        })
    }

    pub fn speedup(&self) -> f64 {
        self.speedup
    }

    fn wall_duration(&self, delta_time: f64) -> Duration {
        Duration::try_from_secs_f64(delta_time / self.speedup).unwrap_or(Duration::ZERO)
    }
}

impl ExecutionManager for RealTime {
    fn reset(&mut self) {
        self.step_started = Some(Instant::now());
    }

    fn preprocess(&mut self) {
        if self.step_started.is_none() {
            self.step_started = Some(Instant::now());
        }
    }

    fn postprocess(&mut self, delta_time: f64) {
        let target = self.wall_duration(delta_time);
        if let Some(started) = self.step_started {
            let elapsed = started.elapsed();
            if elapsed < target {
                thread::sleep(target - elapsed);
            }
        }
        self.step_started = Some(Instant::now());
    }
}
