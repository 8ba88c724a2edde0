//! Hardware-free stand-in for a tensile-test actuator controller.
//!
//! Speaks the controller's newline-framed command protocol over a serial
//! link (or stdin/stdout) and simulates the single linear axis behind it:
//! position converging toward a commanded target one unit per motion tick,
//! plus periodic telemetry with a synthetic tensile reading. No motor and
//! no load cell, just enough behavior for host-side automation to exercise
//! its protocol and timing assumptions against.

pub mod config;
pub mod device;
pub mod link;

pub use config::Config;
pub use device::{ActuatorState, Device};
pub use link::{ChannelLink, Link, MemoryLink};
