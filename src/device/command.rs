// src/device/command.rs - Command vocabulary and interpreter
use super::{ActuatorState, ACK, RESET_POSITION};
use crate::link::Link;

/// One parsed command line. The vocabulary is closed: every inbound line
/// maps to exactly one of these, with `Unrecognized` as the silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `M0` - halt motion where it stands.
    Stop,
    /// `G0 X<n>` - converge toward the given axis coordinate.
    MoveTo(i64),
    /// `G28` - re-activate convergence toward the last target.
    Home,
    /// `G00` - snap the axis to the reset position.
    Reset,
    /// Anything else; ignored without a diagnostic.
    Unrecognized,
}

impl Command {
    /// Classify a completed line by exact prefix, case-sensitive, checked in
    /// fixed priority order. Bytes past a recognized prefix are not
    /// validated except as the numeric payload of a move.
    pub fn parse(line: &[u8]) -> Self {
        if line.starts_with(b"M0") {
            Command::Stop
        } else if line.starts_with(b"G0 X") {
            Command::MoveTo(parse_decimal(&line[4..]))
        } else if line.starts_with(b"G28") {
            Command::Home
        } else if line.starts_with(b"G00") {
            Command::Reset
        } else {
            Command::Unrecognized
        }
    }

    /// Apply the command to the actuator and emit its echo/acknowledgment.
    pub fn apply(self, state: &mut ActuatorState, link: &mut dyn Link) {
        match self {
            Command::Stop => {
                // Pin the target to the halt point so nothing drifts if a
                // later home re-activates motion.
                state.motion_active = false;
                state.target = state.position;
                link.send_line("#STOP#");
                link.send_line(ACK);
            }
            Command::MoveTo(target) => {
                state.target = target;
                state.motion_active = true;
                link.send_line(&format!("#GOTO#{target}"));
            }
            Command::Home => {
                state.motion_active = true;
                link.send_line("#HOME#");
            }
            Command::Reset => {
                state.motion_active = false;
                state.position = RESET_POSITION;
                link.send_line("#RESET#");
            }
            Command::Unrecognized => {
                tracing::trace!("unrecognized line ignored");
            }
        }
    }
}

/// Permissive base-10 parse: skip leading whitespace, take an optional sign
/// and then digits until the first non-digit. No digits means 0, the same
/// answer C's `atol` gives for garbage.
fn parse_decimal(bytes: &[u8]) -> i64 {
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let mut negative = false;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        negative = bytes[i] == b'-';
        i += 1;
    }
    let mut value: i64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value
            .wrapping_mul(10)
            .wrapping_add(i64::from(bytes[i] - b'0'));
        i += 1;
    }
    if negative { value.wrapping_neg() } else { value }
}
