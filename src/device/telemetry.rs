// src/device/telemetry.rs - Periodic position + synthetic tensile reporting
use super::ActuatorState;
use crate::link::Link;
use rand::Rng;

/// Lower bound of the synthetic tensile reading (inclusive).
pub const TENSILE_MIN: i64 = -100;

/// Upper bound of the synthetic tensile reading (exclusive).
pub const TENSILE_MAX: i64 = 1000;

/// Where the synthetic sensor value comes from. The device treats this as
/// an opaque source; production wires in [`RandomTensile`], tests inject
/// something deterministic.
pub trait TensileSource {
    fn sample(&mut self) -> i64;
}

/// Production source: uniform readings in `[TENSILE_MIN, TENSILE_MAX)`.
pub struct RandomTensile {
    rng: rand::rngs::ThreadRng,
}

impl RandomTensile {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomTensile {
    fn default() -> Self {
        Self::new()
    }
}

impl TensileSource for RandomTensile {
    fn sample(&mut self) -> i64 {
        self.rng.random_range(TENSILE_MIN..TENSILE_MAX)
    }
}

/// Emit one telemetry line. Observational only: reads the state, never
/// mutates it, fires whether or not motion is active.
pub fn emit(state: &ActuatorState, source: &mut dyn TensileSource, link: &mut dyn Link) {
    let reading = source.sample();
    link.send_line(&format!("X:{} T:{}", state.position, reading));
}
