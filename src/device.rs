//! Wire-level value types shared with the device bridge
//!
//! These types mirror the payloads exchanged with the controller firmware:
//! the status snapshot returned by `read_status`, and the command shapes
//! for servo/digital-output writes.

use serde::{Deserialize, Serialize};

/// One immutable snapshot of the controller's state
///
/// Produced once per poll; never mutated afterwards. Sequences are
/// index-aligned to the physical channel order reported by the firmware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Servo angle per channel, in degrees
    pub servo_angles: Vec<u16>,
    /// Digital output pin states
    pub digital_outputs: Vec<bool>,
    /// Digital input pin states
    pub digital_inputs: Vec<bool>,
}

/// A single digital input change reported by the device
///
/// Part of the bridge data contract; the firmware may push these
/// independently of a status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalInputEvent {
    /// Input channel index
    pub pin: u8,
    /// Pin level (true = HIGH)
    pub state: bool,
}

/// Command to move one servo channel to an absolute angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoCommand {
    pub id: u8,
    pub angle: u16,
}

/// Command to drive one digital output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalOutputCommand {
    pub pin: u8,
    pub state: bool,
}
