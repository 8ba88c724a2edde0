// src/main.rs - Process bring-up for the tensile dummy
use clap::Parser;
use std::path::PathBuf;
use tensile_dummy::config::Config;
use tensile_dummy::device::{Device, RandomTensile};
use tensile_dummy::link;

/// Hardware-free stand-in for a tensile-test actuator controller.
#[derive(Debug, Parser)]
#[command(name = "tensile-dummy", version)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Serial port to open, overriding the configuration file.
    #[arg(long)]
    port: Option<String>,

    /// Talk over stdin/stdout instead of a serial port.
    #[arg(long)]
    console: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    tracing::info!("Starting tensile dummy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    if let Some(port) = cli.port {
        config.link.port = port;
    }
    if cli.console {
        config.link.console = true;
    }
    config.validate()?;

    let link = if config.link.console {
        tracing::info!("Link: stdin/stdout");
        link::console::open()
    } else {
        tracing::info!("Link: {} @ {} baud", config.link.port, config.link.baud);
        link::serial::open(&config.link)?
    };

    let device = Device::new(Box::new(RandomTensile::new()));
    device.run(link).await;
    Ok(())
}
