//! Measurement-rate gating
//!
//! The simulation ticks at the frame rate but the beacon turret only delivers
//! fresh angles at its own, slower rate. Ticks in between are prediction-only.

/// Accumulates elapsed time and fires once per measurement period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementScheduler {
    period: f64,
    accumulated: f64,
}

impl MeasurementScheduler {
    /// Scheduler firing at `frequency_hz`; the frequency must be positive
    pub fn new(frequency_hz: f64) -> Self {
        Self {
            period: 1.0 / frequency_hz,
            accumulated: 0.0,
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Advance by `dt` seconds; true when a measurement is due this tick
    pub fn advance(&mut self, dt: f64) -> bool {
        self.accumulated += dt.max(0.0);

        if self.accumulated > self.period {
            self.accumulated -= self.period;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
