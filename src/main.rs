//! servo-panel - desktop control panel for an Arduino-class controller
//!
//! Wires the serial bridge to the status sync loop and logs incoming
//! snapshots until interrupted.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use servo_panel::bridge::serial;
use servo_panel::{AppConfig, DeviceStatusSync, SerialBridge};

/// Servo Panel - mirror and control a multi-servo Arduino-class device
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// List available serial ports
    #[arg(long)]
    list_ports: bool,

    /// Serial port override (takes precedence over the config file)
    #[arg(short, long)]
    port: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    if args.list_ports {
        serial::list_ports_formatted();
        return Ok(());
    }

    info!("Starting servo-panel...");
    info!("Configuration file: {}", args.config);

    let mut config = AppConfig::load(&args.config).await?;
    if let Some(port) = args.port {
        config.serial.port = port;
    }

    let bridge = Arc::new(SerialBridge::open(
        &config.serial.port,
        config.serial.baud_rate,
        config.serial_timeout(),
    )?);
    info!("Serial bridge open on {}", config.serial.port);

    let sync = DeviceStatusSync::new(bridge, config.poll_interval());
    sync.subscribe(|status| match status {
        Some(s) => info!(
            "Device status: servos={:?} outputs={:?} inputs={:?}",
            s.servo_angles, s.digital_outputs, s.digital_inputs
        ),
        None => debug!("Device status not yet known"),
    });

    sync.start();
    shutdown_signal().await;
    sync.stop();

    info!("servo-panel shutdown complete");
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    info!("Shutdown signal received");
}
