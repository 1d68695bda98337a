//! servo-panel - client-side state layer for an Arduino-class controller
//!
//! Keeps an in-memory mirror of device state (servo angles, digital
//! input/output pins) synchronized with a physical controller over a
//! serial bridge, and lets UI views subscribe to and mutate that mirror
//! without talking to the device directly.

pub mod bridge;
pub mod config;
pub mod device;
pub mod state;

pub use bridge::{BridgeError, DeviceBridge, SerialBridge};
pub use config::AppConfig;
pub use device::{DeviceStatus, DigitalInputEvent, DigitalOutputCommand, ServoCommand};
pub use state::{DeviceStatusSync, LocalServoRegistry, ServoRecord, SubscriptionId};
