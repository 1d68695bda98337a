//! State stores backing the control panel UI
//!
//! Two independent stores: `DeviceStatusSync` mirrors the physical
//! controller through the bridge's polling loop, `LocalServoRegistry`
//! holds the panel's own servo table. They never talk to each other;
//! reconciling desired vs. actual angles is the caller's business.

mod servos;
mod subscription;
mod sync;

pub use servos::{LocalServoRegistry, ServoRecord};
pub use subscription::SubscriptionId;
pub use sync::{DeviceStatusSync, DEFAULT_POLL_INTERVAL};
