//! LocalServoRegistry - the panel's own servo table
//!
//! Purely local: the device never writes here, and nothing here talks to
//! the bridge. UI intent flows in through `update_angle`, the full table
//! flows out to subscribers.

use parking_lot::RwLock;
use std::sync::Arc;

use super::subscription::{Subscribers, SubscriptionId};

/// Number of servo channels on the default panel
pub const DEFAULT_SERVO_COUNT: u8 = 6;
/// Centered position, the startup angle for every channel
pub const DEFAULT_ANGLE: u16 = 90;

/// One servo row: stable id, current angle in degrees
///
/// No range is enforced on the angle here; the firmware clamps writes to
/// its own limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoRecord {
    pub id: u8,
    pub angle: u16,
}

/// In-memory servo table with subscribe/notify semantics
///
/// The id set is fixed at construction; only angles change.
pub struct LocalServoRegistry {
    servos: RwLock<Vec<ServoRecord>>,
    subscribers: Subscribers<[ServoRecord]>,
}

impl LocalServoRegistry {
    /// Default table: ids 1..=6, every angle at 90
    pub fn new() -> Self {
        let servos = (1..=DEFAULT_SERVO_COUNT)
            .map(|id| ServoRecord {
                id,
                angle: DEFAULT_ANGLE,
            })
            .collect();
        Self::with_records(servos)
    }

    /// Build a registry around a custom table
    pub fn with_records(servos: Vec<ServoRecord>) -> Self {
        Self {
            servos: RwLock::new(servos),
            subscribers: Subscribers::new(),
        }
    }

    /// Register an observer for the servo table
    ///
    /// Called immediately with the current table, then after every
    /// `update_angle`.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&[ServoRecord]) + Send + Sync + 'static,
    {
        // Replay from a clone so the observer may call back into the
        // registry, like `update_angle` publishes outside the lock
        let table = self.servos.read().clone();
        observer(&table);
        self.subscribers.add(Arc::new(observer))
    }

    /// Drop a previously registered observer
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.remove(id);
    }

    /// Current table contents
    pub fn records(&self) -> Vec<ServoRecord> {
        self.servos.read().clone()
    }

    /// Set the angle of the servo with the given id
    ///
    /// An unknown id leaves the table untouched. The table is re-published
    /// to subscribers on every call, matched or not.
    pub fn update_angle(&self, id: u8, angle: u16) {
        let table = {
            let mut servos = self.servos.write();
            if let Some(record) = servos.iter_mut().find(|r| r.id == id) {
                record.angle = angle;
            }
            servos.clone()
        };
        self.subscribers.notify(&table);
    }
}

impl Default for LocalServoRegistry {
    fn default() -> Self {
        Self::new()
    }
}
