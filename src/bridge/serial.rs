//! Serial-port implementation of the device bridge
//!
//! Wraps a blocking `serialport` handle; every round trip runs on the
//! blocking thread pool so the async callers never stall on port I/O.

use async_trait::async_trait;
use parking_lot::Mutex;
use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{protocol, BridgeError, DeviceBridge};
use crate::device::{DeviceStatus, DigitalOutputCommand, ServoCommand};

/// Non-frame lines tolerated before a read gives up
///
/// The firmware prints a boot banner and `ERR:` diagnostics on the same
/// line stream as status frames.
const MAX_SKIPPED_LINES: usize = 8;

/// Device bridge over a local serial port
pub struct SerialBridge {
    port: Arc<Mutex<Option<Box<dyn SerialPort>>>>,
}

impl SerialBridge {
    /// Open the given port and return a connected bridge
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, BridgeError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()?;
        debug!("Opened serial port {} at {} baud", port_name, baud_rate);

        Ok(Self {
            port: Arc::new(Mutex::new(Some(port))),
        })
    }

    /// Drop the underlying port; later calls fail with `Disconnected`
    pub fn disconnect(&self) {
        self.port.lock().take();
    }

    /// Names of the serial ports visible on this machine
    pub fn list_ports() -> Result<Vec<String>, BridgeError> {
        let ports = serialport::available_ports()?;
        Ok(ports.into_iter().map(|p| p.port_name).collect())
    }

    /// Run one blocking port operation on the blocking pool
    async fn with_port<T, F>(&self, op: F) -> Result<T, BridgeError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Box<dyn SerialPort>) -> Result<T, BridgeError> + Send + 'static,
    {
        let port = Arc::clone(&self.port);
        tokio::task::spawn_blocking(move || {
            let mut guard = port.lock();
            let port = guard.as_mut().ok_or(BridgeError::Disconnected)?;
            op(port)
        })
        .await
        .map_err(|e| BridgeError::Io(io::Error::other(e)))?
    }
}

#[async_trait]
impl DeviceBridge for SerialBridge {
    async fn read_status(&self) -> Result<DeviceStatus, BridgeError> {
        self.with_port(|port| {
            port.write_all(protocol::encode_status_request().as_bytes())?;
            port.flush()?;
            read_status_frame(port)
        })
        .await
    }

    async fn send_servo(&self, cmd: ServoCommand) -> Result<(), BridgeError> {
        self.with_port(move |port| {
            port.write_all(protocol::encode_servo_command(cmd).as_bytes())?;
            port.flush()?;
            Ok(())
        })
        .await
    }

    async fn send_digital_output(&self, cmd: DigitalOutputCommand) -> Result<(), BridgeError> {
        self.with_port(move |port| {
            port.write_all(protocol::encode_digital_output(cmd).as_bytes())?;
            port.flush()?;
            Ok(())
        })
        .await
    }
}

/// Read lines off the port until one parses as a status frame
fn read_status_frame(port: &mut Box<dyn SerialPort>) -> Result<DeviceStatus, BridgeError> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    let mut skipped = 0;

    loop {
        match port.read(&mut byte) {
            Ok(0) => return Err(BridgeError::Disconnected),
            Ok(_) => {
                if byte[0] != b'\n' {
                    line.push(byte[0]);
                    continue;
                }

                let text = String::from_utf8_lossy(&line).to_string();
                line.clear();
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.starts_with('S') && trimmed.ends_with('E') {
                    return protocol::parse_status_frame(trimmed);
                }

                debug!("Skipping non-frame line from device: {:?}", trimmed);
                skipped += 1;
                if skipped >= MAX_SKIPPED_LINES {
                    return Err(BridgeError::Protocol(
                        "no status frame among device output".to_string(),
                    ));
                }
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => return Err(BridgeError::Timeout),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Print visible serial ports, for the `--list-ports` flag
pub fn list_ports_formatted() {
    match SerialBridge::list_ports() {
        Ok(ports) if ports.is_empty() => println!("No serial ports found"),
        Ok(ports) => {
            println!("Available serial ports:");
            for name in ports {
                println!("  {name}");
            }
        }
        Err(e) => eprintln!("Failed to enumerate serial ports: {e}"),
    }
}
