// src/link/serial.rs - Real serial transport behind a ChannelLink
use super::{ChannelLink, LinkError};
use crate::config::LinkConfig;
use serial2_tokio::SerialPort;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Open the configured serial port and spawn the reader/writer tasks that
/// shuttle bytes between it and the returned link. Must be called from
/// within a tokio runtime.
///
/// Transport faults after open are logged, not surfaced: the device keeps
/// ticking and a dead port reads as silence.
pub fn open(config: &LinkConfig) -> Result<ChannelLink, LinkError> {
    let port = SerialPort::open(&config.port, config.baud).map_err(|source| LinkError::Open {
        port: config.port.clone(),
        source,
    })?;
    let port = Arc::new(port);

    let (byte_tx, byte_rx) = mpsc::unbounded_channel();
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();

    let reader = Arc::clone(&port);
    tokio::spawn(async move {
        let mut buf = [0u8; 256];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => {
                    tracing::info!("serial port closed");
                    break;
                }
                Ok(n) => {
                    tracing::trace!(bytes = n, "serial rx");
                    for &byte in &buf[..n] {
                        if byte_tx.send(byte).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("serial read failed: {e}");
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            tracing::trace!(line = %line, "serial tx");
            let framed = format!("{line}\n");
            if let Err(e) = write_all(&port, framed.as_bytes()).await {
                tracing::error!("serial write failed: {e}");
                break;
            }
        }
    });

    Ok(ChannelLink::new(byte_rx, line_tx))
}

async fn write_all(port: &SerialPort, mut buf: &[u8]) -> std::io::Result<()> {
    while !buf.is_empty() {
        let written = port.write(buf).await?;
        buf = &buf[written..];
    }
    Ok(())
}
