//! DeviceStatusSync - polling loop against the device bridge
//!
//! Owns the one canonical status snapshot and refreshes it on a fixed
//! interval. Subscribers get the current value on registration and every
//! new snapshot afterwards. A failed poll is logged and swallowed; the
//! last good snapshot stays visible and the loop keeps ticking, so the
//! fixed interval doubles as the retry mechanism.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::subscription::{Subscribers, SubscriptionId};
use crate::bridge::DeviceBridge;
use crate::device::DeviceStatus;

/// Default time between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Continuously refreshed mirror of the controller's status
///
/// Two states only: idle (no poll task) and polling. `start`/`stop` are
/// idempotent; stopping keeps the last snapshot around for late
/// subscribers.
pub struct DeviceStatusSync {
    inner: Arc<SyncInner>,
    /// Present iff the polling loop is active
    poll_task: Mutex<Option<JoinHandle<()>>>,
    poll_interval: Duration,
}

struct SyncInner {
    bridge: Arc<dyn DeviceBridge>,
    /// None until the first successful poll
    latest: RwLock<Option<Arc<DeviceStatus>>>,
    subscribers: Subscribers<Option<Arc<DeviceStatus>>>,
}

impl DeviceStatusSync {
    pub fn new(bridge: Arc<dyn DeviceBridge>, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                bridge,
                latest: RwLock::new(None),
                subscribers: Subscribers::new(),
            }),
            poll_task: Mutex::new(None),
            poll_interval,
        }
    }

    /// Register an observer for status snapshots
    ///
    /// The observer is invoked immediately with the current value (`None`
    /// before the first successful poll) and again after every successful
    /// poll. All observers see the same `Arc` per update.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&Option<Arc<DeviceStatus>>) + Send + Sync + 'static,
    {
        // Replay and registration are one atomic step, so a poll that
        // completes concurrently is delivered either as the replay or as
        // a notification - never dropped between the two
        let inner = &self.inner;
        inner.subscribers.add_and_replay(Arc::new(observer), |observer| {
            let current = inner.latest.read().clone();
            observer(&current);
        })
    }

    /// Drop a previously registered observer
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.subscribers.remove(id);
    }

    /// Most recent snapshot, if any poll has succeeded yet
    pub fn latest(&self) -> Option<Arc<DeviceStatus>> {
        self.inner.latest.read().clone()
    }

    /// Whether the polling loop is currently armed
    pub fn is_polling(&self) -> bool {
        self.poll_task.lock().is_some()
    }

    /// Arm the polling loop: one immediate fetch, then one per interval
    ///
    /// No-op when already polling - never a second timer or a duplicate
    /// immediate fetch.
    pub fn start(&self) {
        let mut task = self.poll_task.lock();
        if task.is_some() {
            debug!("Status polling already active, ignoring start");
            return;
        }

        let inner = Arc::clone(&self.inner);
        let period = self.poll_interval;
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                // First tick completes immediately
                ticker.tick().await;
                inner.fetch_once().await;
            }
        }));
        debug!("Status polling started (interval {:?})", period);
    }

    /// Disarm the polling loop; no-op when idle
    ///
    /// The last snapshot is kept. An in-flight fetch is cancelled rather
    /// than applied late.
    pub fn stop(&self) {
        if let Some(task) = self.poll_task.lock().take() {
            task.abort();
            debug!("Status polling stopped");
        }
    }

    /// Run one fetch-and-publish round trip outside the timer
    pub async fn fetch_once(&self) {
        self.inner.fetch_once().await;
    }
}

impl Drop for DeviceStatusSync {
    fn drop(&mut self) {
        self.stop();
    }
}

impl SyncInner {
    /// One poll: fetch, replace the snapshot, notify
    ///
    /// Any bridge failure leaves `latest` untouched and never escapes;
    /// the next tick proceeds normally.
    async fn fetch_once(&self) {
        match self.bridge.read_status().await {
            Ok(status) => {
                let snapshot = Arc::new(status);
                *self.latest.write() = Some(Arc::clone(&snapshot));
                self.subscribers.notify(&Some(snapshot));
            }
            Err(e) => warn!("Status poll failed: {}", e),
        }
    }
}
