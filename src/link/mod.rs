// src/link/mod.rs - Byte-in / line-out seam between the device and the world
pub mod console;
pub mod serial;

use std::collections::VecDeque;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        source: std::io::Error,
    },
}

/// What the device core needs from its transport: raw inbound bytes on
/// demand, whole outbound lines fire-and-forget. Implementations must never
/// block; a silent link just returns `None`.
pub trait Link {
    /// Next inbound byte already available, if any.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Queue one line for the outbound side. Framing (the trailing newline)
    /// is the transport's job.
    fn send_line(&mut self, line: &str);
}

/// Channel-backed link: a reader task feeds inbound bytes into an unbounded
/// channel, a writer task drains outbound lines. The device side stays
/// strictly non-blocking either way.
pub struct ChannelLink {
    inbound: mpsc::UnboundedReceiver<u8>,
    outbound: mpsc::UnboundedSender<String>,
}

impl ChannelLink {
    pub fn new(
        inbound: mpsc::UnboundedReceiver<u8>,
        outbound: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self { inbound, outbound }
    }
}

impl Link for ChannelLink {
    fn poll_byte(&mut self) -> Option<u8> {
        self.inbound.try_recv().ok()
    }

    fn send_line(&mut self, line: &str) {
        if self.outbound.send(line.to_string()).is_err() {
            tracing::warn!(line, "outbound side gone, line dropped");
        }
    }
}

/// In-memory link for tests and benches: feed input up front, collect every
/// line the device sends.
#[derive(Debug, Default)]
pub struct MemoryLink {
    inbound: VecDeque<u8>,
    pub sent: Vec<String>,
}

impl MemoryLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, text: &str) {
        self.inbound.extend(text.bytes());
    }

    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }
}

impl Link for MemoryLink {
    fn poll_byte(&mut self) -> Option<u8> {
        self.inbound.pop_front()
    }

    fn send_line(&mut self, line: &str) {
        self.sent.push(line.to_string());
    }
}
