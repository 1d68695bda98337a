//! Device bridge - the asynchronous boundary to the physical controller
//!
//! Everything above this module sees the controller as an opaque
//! request/response channel: ask for a status snapshot, get one back or
//! fail. The serial transport lives in `bridge::serial`; the framed ASCII
//! protocol in `bridge::protocol`.

use async_trait::async_trait;
use thiserror::Error;

use crate::device::{DeviceStatus, DigitalOutputCommand, ServoCommand};

pub mod protocol;
pub mod serial;

pub use serial::SerialBridge;

/// Failure to complete one bridge round trip
///
/// Every variant is transient: the device may be unplugged for an arbitrary
/// period and is expected to resume answering the moment it reconnects.
/// Callers recover by simply trying again on the next poll.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Port(#[from] serialport::Error),

    #[error("device did not answer within the timeout")]
    Timeout,

    #[error("port is not connected")]
    Disconnected,

    #[error("malformed frame from device: {0}")]
    Protocol(String),
}

/// Asynchronous request/response channel to the controller
///
/// All methods take `&self`; implementations use interior mutability for
/// the underlying transport so the bridge can be shared behind an `Arc`.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Fetch one status snapshot (`read_status`)
    async fn read_status(&self) -> Result<DeviceStatus, BridgeError>;

    /// Move one servo to an absolute angle
    async fn send_servo(&self, cmd: ServoCommand) -> Result<(), BridgeError>;

    /// Drive one digital output pin
    async fn send_digital_output(&self, cmd: DigitalOutputCommand) -> Result<(), BridgeError>;
}
