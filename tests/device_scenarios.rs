// End-to-end protocol scenarios against the device with its build-time
// cadences: bytes in through the link, lines out, no real time involved.

use tensile_dummy::device::telemetry::TensileSource;
use tensile_dummy::device::{BANNER, Device, INITIAL_POSITION, RECV_CAPACITY};
use tensile_dummy::link::MemoryLink;

struct FixedTensile(i64);

impl TensileSource for FixedTensile {
    fn sample(&mut self) -> i64 {
        self.0
    }
}

fn device() -> Device {
    Device::new(Box::new(FixedTensile(42)))
}

fn service_n(device: &mut Device, link: &mut MemoryLink, n: usize) {
    for _ in 0..n {
        device.service(link);
    }
}

fn non_telemetry(link: &MemoryLink) -> Vec<&str> {
    link.sent
        .iter()
        .map(String::as_str)
        .filter(|l| !l.starts_with("X:"))
        .collect()
}

#[test]
fn banner_goes_out_first() {
    let mut device = device();
    let mut link = MemoryLink::new();
    device.announce(&mut link);
    device.service(&mut link);
    assert_eq!(link.sent[0], BANNER);
}

#[test]
fn goto_scenario_converges_in_fifty_cadences() {
    let mut device = device();
    let mut link = MemoryLink::new();
    assert_eq!(device.state().position, 50);

    link.feed("G0 X100\n");
    // Motion steps at ticks 0, 100, ..., 4900: fifty cadences in total.
    service_n(&mut device, &mut link, 4901);

    assert_eq!(device.state().position, 100);
    assert!(!device.state().motion_active);
    assert_eq!(
        link.sent,
        vec![
            "#GOTO#100".to_string(),
            "X:51 T:42".to_string(),
            "X:71 T:42".to_string(),
            "X:91 T:42".to_string(),
            "ok".to_string(),
        ]
    );

    // Converged means converged: another thousand ticks change nothing.
    let sent_before = link.sent.len();
    service_n(&mut device, &mut link, 1000);
    assert_eq!(device.state().position, 100);
    assert_eq!(link.sent.len(), sent_before);
}

#[test]
fn stop_scenario_freezes_mid_move() {
    let mut device = device();
    let mut link = MemoryLink::new();

    link.feed("G0 X100\n");
    // Twenty motion cadences (ticks 0..=1900) put the axis at 70.
    service_n(&mut device, &mut link, 1901);
    assert_eq!(device.state().position, 70);
    assert!(device.state().motion_active);

    link.feed("M0\n");
    device.service(&mut link);
    assert_eq!(device.state().position, 70);
    assert_eq!(device.state().target, 70);
    assert!(!device.state().motion_active);
    assert_eq!(non_telemetry(&link), vec!["#GOTO#100", "#STOP#", "ok"]);

    // No further movement through plenty of motion cadences.
    service_n(&mut device, &mut link, 1000);
    assert_eq!(device.state().position, 70);
    assert_eq!(non_telemetry(&link), vec!["#GOTO#100", "#STOP#", "ok"]);
}

#[test]
fn overflowing_line_is_dropped_not_fatal() {
    let mut device = device();
    let mut link = MemoryLink::new();

    // Way past capacity with no terminator in the first capacity-1 bytes:
    // the content is lost without any report.
    link.feed_bytes(&[b'Q'; RECV_CAPACITY + 20]);
    link.feed("\n");
    service_n(&mut device, &mut link, 10);
    assert!(non_telemetry(&link).is_empty());
    assert_eq!(device.state().position, INITIAL_POSITION);

    // The device is still alive and parsing.
    link.feed("M0\n");
    service_n(&mut device, &mut link, 10);
    assert_eq!(non_telemetry(&link), vec!["#STOP#", "ok"]);
}

#[test]
fn home_with_reached_target_stays_silent() {
    let mut device = device();
    let mut link = MemoryLink::new();

    link.feed("G28\n");
    service_n(&mut device, &mut link, 500);
    // Active but already converged: no steps, no ack, ever.
    assert!(device.state().motion_active);
    assert_eq!(device.state().position, INITIAL_POSITION);
    assert_eq!(non_telemetry(&link), vec!["#HOME#"]);
}

#[test]
fn home_resumes_the_last_commanded_target() {
    let mut device = device();
    let mut link = MemoryLink::new();

    link.feed("G0 X60\n");
    service_n(&mut device, &mut link, 1000);
    assert_eq!(device.state().position, 60);

    // Reset snaps away, then home converges back to the stale target.
    link.feed("G00\n");
    service_n(&mut device, &mut link, 10);
    assert_eq!(device.state().position, 80);
    assert!(!device.state().motion_active);

    link.feed("G28\n");
    service_n(&mut device, &mut link, 2100);
    assert_eq!(device.state().position, 60);
    assert!(!device.state().motion_active);
    let echoes = non_telemetry(&link);
    assert_eq!(echoes, vec!["#GOTO#60", "ok", "#RESET#", "#HOME#", "ok"]);
}

#[test]
fn unparsable_move_target_means_zero() {
    let mut device = device();
    let mut link = MemoryLink::new();

    link.feed("G0 Xoops\n");
    device.service(&mut link);
    assert_eq!(device.state().target, 0);
    assert!(device.state().motion_active);
    assert_eq!(non_telemetry(&link), vec!["#GOTO#0"]);
}

#[test]
fn telemetry_keeps_its_cadence_while_idle_and_moving() {
    let mut device = device();
    let mut link = MemoryLink::new();

    // Idle: 6000 ticks cover telemetry at 0, 2000 and 4000.
    service_n(&mut device, &mut link, 6000);
    assert_eq!(link.sent.len(), 3);
    assert!(link.sent.iter().all(|l| l == "X:50 T:42"));

    // Moving changes nothing about the cadence.
    link.feed("G0 X2000\n");
    service_n(&mut device, &mut link, 6000);
    let telemetry_count = link.sent.iter().filter(|l| l.starts_with("X:")).count();
    assert_eq!(telemetry_count, 6);
}

#[test]
fn garbage_between_commands_is_ignored() {
    let mut device = device();
    let mut link = MemoryLink::new();

    link.feed("bogus\n\nG1 X5\nM0\n");
    service_n(&mut device, &mut link, 10);
    assert_eq!(non_telemetry(&link), vec!["#STOP#", "ok"]);
    assert_eq!(device.state().position, INITIAL_POSITION);
}
