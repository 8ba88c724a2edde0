// src/link/console.rs - stdin/stdout transport for pipe-driven use
use super::ChannelLink;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;

/// Wire the device to stdin/stdout. Same channel plumbing as the serial
/// link, so host tooling can drive the dummy through a plain pipe. Must be
/// called from within a tokio runtime.
pub fn open() -> ChannelLink {
    let (byte_tx, byte_rx) = mpsc::unbounded_channel();
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut buf = [0u8; 256];
        loop {
            match stdin.read(&mut buf).await {
                Ok(0) => {
                    tracing::info!("stdin closed");
                    break;
                }
                Ok(n) => {
                    for &byte in &buf[..n] {
                        if byte_tx.send(byte).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("stdin read failed: {e}");
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = line_rx.recv().await {
            let framed = format!("{line}\n");
            if stdout.write_all(framed.as_bytes()).await.is_err() {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    ChannelLink::new(byte_rx, line_tx)
}
