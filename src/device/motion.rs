// src/device/motion.rs - Constant-rate convergence toward the target
use super::ActuatorState;

/// What a single motion tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Motion inactive, or already at the target. Nothing happened.
    Idle,
    /// Moved one unit; still short of the target.
    Moved,
    /// Moved one unit and landed on the target; motion deactivated.
    Arrived,
}

/// Advance the axis one unit toward the target.
///
/// Direction is recomputed every step, so overshoot is impossible; reaching
/// the target deactivates motion. Idempotent at rest: an inactive device or
/// one whose position already matches the target is left untouched, which
/// also means a home onto the current position never acks.
pub fn step(state: &mut ActuatorState) -> StepOutcome {
    if !state.motion_active || state.position == state.target {
        return StepOutcome::Idle;
    }

    if state.position > state.target {
        state.position -= 1;
    } else {
        state.position += 1;
    }

    if state.position == state.target {
        state.motion_active = false;
        StepOutcome::Arrived
    } else {
        StepOutcome::Moved
    }
}
