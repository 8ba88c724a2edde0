// src/device/schedule.rs - Tick counter and per-task cadence divisors
use super::{MOTION_CADENCE, TELEMETRY_CADENCE};

/// How often a periodic task fires, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period: u64,
}

impl Cadence {
    pub const fn every(period: u64) -> Self {
        Self { period }
    }

    pub fn due(&self, tick: u64) -> bool {
        tick % self.period == 0
    }
}

/// The device's notion of time: a monotonically incrementing tick counter
/// plus one cadence per periodic task. Purely logical, so tests drive it
/// without real delays.
#[derive(Debug, Clone, Copy)]
pub struct TickSchedule {
    tick: u64,
    motion: Cadence,
    telemetry: Cadence,
}

impl TickSchedule {
    pub fn new() -> Self {
        Self::with_cadences(
            Cadence::every(MOTION_CADENCE),
            Cadence::every(TELEMETRY_CADENCE),
        )
    }

    pub fn with_cadences(motion: Cadence, telemetry: Cadence) -> Self {
        Self {
            tick: 0,
            motion,
            telemetry,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn motion_due(&self) -> bool {
        self.motion.due(self.tick)
    }

    pub fn telemetry_due(&self) -> bool {
        self.telemetry.due(self.tick)
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new()
    }
}
