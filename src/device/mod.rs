// src/device/mod.rs - The simulated actuator controller
pub mod command;
pub mod motion;
pub mod receiver;
pub mod schedule;
pub mod telemetry;

use crate::link::Link;
use command::Command;
use motion::StepOutcome;
use receiver::LineReceiver;
use schedule::TickSchedule;
use telemetry::TensileSource;

pub use telemetry::RandomTensile;

/// Receive buffer capacity in bytes. At most `RECV_CAPACITY - 1` bytes of a
/// line are kept; the rest are dropped on the floor.
pub const RECV_CAPACITY: usize = 32;

/// Byte that ends a command line (ASCII 10).
pub const LINE_TERMINATOR: u8 = b'\n';

/// Axis position the device powers up at.
pub const INITIAL_POSITION: i64 = 50;

/// Axis position the `G00` reset command snaps to.
pub const RESET_POSITION: i64 = 80;

/// Motion simulator runs every this many ticks.
pub const MOTION_CADENCE: u64 = 100;

/// Telemetry is emitted every this many ticks.
pub const TELEMETRY_CADENCE: u64 = 2000;

/// Pacing delay between scheduler iterations.
pub const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1);

/// Line printed once at startup, before the first tick.
pub const BANNER: &str = "Tensile Dummy V0.000001";

/// Acknowledgment line for a completed move or stop.
pub const ACK: &str = "ok";

/// The actuator's simulated condition.
///
/// `target` is only meaningful while `motion_active` is true; once motion
/// deactivates the device is at rest and the target is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub position: i64,
    pub target: i64,
    pub motion_active: bool,
}

impl ActuatorState {
    pub fn new() -> Self {
        Self {
            position: INITIAL_POSITION,
            target: INITIAL_POSITION,
            motion_active: false,
        }
    }
}

impl Default for ActuatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// The whole dummy device: actuator state, line receiver, tick schedule and
/// the telemetry source, driven one cooperative tick at a time.
pub struct Device {
    state: ActuatorState,
    receiver: LineReceiver,
    schedule: TickSchedule,
    source: Box<dyn TensileSource>,
}

impl Device {
    pub fn new(source: Box<dyn TensileSource>) -> Self {
        Self::with_schedule(TickSchedule::new(), source)
    }

    /// Build a device with custom cadences. Tests use this to converge in a
    /// handful of ticks instead of thousands.
    pub fn with_schedule(schedule: TickSchedule, source: Box<dyn TensileSource>) -> Self {
        Self {
            state: ActuatorState::new(),
            receiver: LineReceiver::new(),
            schedule,
            source,
        }
    }

    pub fn state(&self) -> &ActuatorState {
        &self.state
    }

    pub fn tick(&self) -> u64 {
        self.schedule.tick()
    }

    /// Emit the startup banner. Called once by [`Device::run`] before the
    /// first tick, mirroring the firmware's power-on print.
    pub fn announce(&mut self, link: &mut dyn Link) {
        link.send_line(BANNER);
    }

    /// One scheduler iteration: drain available input, interpret a completed
    /// line, run the cadence-gated motion and telemetry checks, advance the
    /// tick counter. Pacing between iterations is the caller's job.
    pub fn service(&mut self, link: &mut dyn Link) {
        if self.receiver.poll(link) {
            let command = Command::parse(self.receiver.line());
            tracing::debug!(?command, "line received");
            command.apply(&mut self.state, link);
            self.receiver.clear();
        }

        if self.schedule.motion_due() {
            if let StepOutcome::Arrived = motion::step(&mut self.state) {
                link.send_line(ACK);
            }
        }

        if self.schedule.telemetry_due() {
            telemetry::emit(&self.state, self.source.as_mut(), link);
        }

        self.schedule.advance();
    }

    /// Run the device forever: banner, then tick / sleep until the process
    /// dies. There is no terminal state.
    pub async fn run<L: Link>(mut self, mut link: L) {
        self.announce(&mut link);
        tracing::info!("device loop started");
        loop {
            self.service(&mut link);
            tokio::time::sleep(TICK_INTERVAL).await;
        }
    }
}
