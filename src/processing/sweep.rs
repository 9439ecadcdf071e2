//! Bearing angles from laser sweep timestamps
//!
//! A rotating turret passes the beacons in the order B, C, A on every turn and
//! latches a free-running `u32` timer at each pass. One full turn is the time
//! between two consecutive passes of A; the angles are the fractions of that
//! turn spent between consecutive beacons.
//!
//! All timer arithmetic wraps, so sweeps spanning a counter overflow are fine.

use crate::core::{BearingAngles, LandmarkId};
use std::f64::consts::TAU;
use tracing::{debug, trace};

/// Latest and previous accepted pass of one beacon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Passes {
    latest: u32,
    previous: u32,
}

impl Passes {
    /// Debounced update; true when the timestamp was accepted
    fn record(&mut self, time: u32, minimal_period: u32) -> bool {
        if time.wrapping_sub(self.latest) > minimal_period {
            self.previous = self.latest;
            self.latest = time;
            true
        } else {
            false
        }
    }
}

/// Timestamp bookkeeping for the three beacons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeaconSweepTimer {
    a: Passes,
    b: Passes,
    c: Passes,
    minimal_period: u32,
}

impl BeaconSweepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passes closer than this to the previous one of the same beacon are
    /// rejected as reflections or edge bounce
    pub fn set_minimal_period(&mut self, period: u32) {
        self.minimal_period = period;
    }

    pub fn minimal_period(&self) -> u32 {
        self.minimal_period
    }

    /// Record a pass of `beacon` at timer value `time`.
    ///
    /// Returns true when an A pass was accepted, i.e. a sweep just completed
    /// and [`BeaconSweepTimer::calculate`] is worth calling.
    pub fn update_timestamp(&mut self, beacon: LandmarkId, time: u32) -> bool {
        let passes = match beacon {
            LandmarkId::A => &mut self.a,
            LandmarkId::B => &mut self.b,
            LandmarkId::C => &mut self.c,
        };

        let accepted = passes.record(time, self.minimal_period);
        if !accepted {
            trace!(%beacon, time, "rejected bouncing edge");
        }
        accepted && beacon == LandmarkId::A
    }

    /// Angles of the last completed sweep, or `None` if B and C were not both
    /// seen in order since the previous A pass
    pub fn calculate(&self) -> Option<BearingAngles> {
        let (a, a_old) = (self.a.latest, self.a.previous);
        let (b, c) = (self.b.latest, self.c.latest);

        let turn = a.wrapping_sub(a_old);
        let since_b = a.wrapping_sub(b);
        let since_c = a.wrapping_sub(c);

        if !(turn > since_b && since_b > since_c) {
            debug!(a, a_old, b, c, "incomplete sweep");
            return None;
        }

        let scale = TAU / f64::from(turn);
        Some(BearingAngles {
            alpha: f64::from(c.wrapping_sub(b)) * scale,
            beta: f64::from(a.wrapping_sub(c)) * scale,
            gamma: f64::from(b.wrapping_sub(a_old)) * scale,
        })
    }
}
