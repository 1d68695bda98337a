//! Framed ASCII protocol spoken by the controller firmware
//!
//! Write commands are single lines (`S<id>:<angle>` for servos,
//! `D<pin>:HIGH|LOW` for outputs). A status request is the bare `R` line;
//! the firmware answers with one frame of the form
//! `S<a1>,...,<a6>,<o1>,<o2>,<o3>,<i1>,<i2>,<i3>E` - six servo angles,
//! three digital output levels, three digital input levels.

use crate::bridge::BridgeError;
use crate::device::{DeviceStatus, DigitalOutputCommand, ServoCommand};

/// Frame start marker
const START_BIT: char = 'S';
/// Frame end marker
const END_BIT: char = 'E';
const DELIMITER: char = ',';

/// Channel layout baked into the firmware's pin map
pub const SERVO_CHANNELS: usize = 6;
pub const DIGITAL_OUTPUT_PINS: usize = 3;
pub const DIGITAL_INPUT_PINS: usize = 3;

/// Line sent to request one status frame
pub fn encode_status_request() -> String {
    "R\n".to_string()
}

/// Line form of a servo move command
pub fn encode_servo_command(cmd: ServoCommand) -> String {
    format!("S{}:{}\n", cmd.id, cmd.angle)
}

/// Line form of a digital output command
pub fn encode_digital_output(cmd: DigitalOutputCommand) -> String {
    let level = if cmd.state { "HIGH" } else { "LOW" };
    format!("D{}:{}\n", cmd.pin, level)
}

/// Parse one status frame into a snapshot
///
/// The frame must carry exactly the firmware's channel layout; anything
/// else (bad markers, wrong field count, non-numeric fields) is a
/// `BridgeError::Protocol`.
pub fn parse_status_frame(line: &str) -> Result<DeviceStatus, BridgeError> {
    let line = line.trim();

    let inner = line
        .strip_prefix(START_BIT)
        .and_then(|rest| rest.strip_suffix(END_BIT))
        .ok_or_else(|| BridgeError::Protocol(format!("missing frame markers in {line:?}")))?;

    let fields: Vec<&str> = inner.split(DELIMITER).collect();
    let expected = SERVO_CHANNELS + DIGITAL_OUTPUT_PINS + DIGITAL_INPUT_PINS;
    if fields.len() != expected {
        return Err(BridgeError::Protocol(format!(
            "expected {expected} fields, got {}",
            fields.len()
        )));
    }

    let mut servo_angles = Vec::with_capacity(SERVO_CHANNELS);
    for field in &fields[..SERVO_CHANNELS] {
        let angle: u16 = field
            .parse()
            .map_err(|_| BridgeError::Protocol(format!("bad servo angle {field:?}")))?;
        servo_angles.push(angle);
    }

    let parse_level = |field: &str| -> Result<bool, BridgeError> {
        let level: u8 = field
            .parse()
            .map_err(|_| BridgeError::Protocol(format!("bad pin level {field:?}")))?;
        Ok(level != 0)
    };

    let digital_outputs = fields[SERVO_CHANNELS..SERVO_CHANNELS + DIGITAL_OUTPUT_PINS]
        .iter()
        .map(|f| parse_level(f))
        .collect::<Result<Vec<_>, _>>()?;
    let digital_inputs = fields[SERVO_CHANNELS + DIGITAL_OUTPUT_PINS..]
        .iter()
        .map(|f| parse_level(f))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DeviceStatus {
        servo_angles,
        digital_outputs,
        digital_inputs,
    })
}
