//! Subscriber bookkeeping shared by the state stores

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Deregistration handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer list with stable ids for deregistration
///
/// Notification is synchronous: `notify` invokes every registered
/// observer before returning, in registration order.
pub(crate) struct Subscribers<T: ?Sized> {
    #[allow(clippy::type_complexity)]
    entries: RwLock<Vec<(SubscriptionId, Arc<dyn Fn(&T) + Send + Sync>)>>,
    next_id: AtomicU64,
}

impl<T: ?Sized> Subscribers<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub(crate) fn add(&self, observer: Arc<dyn Fn(&T) + Send + Sync>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.write().push((id, observer));
        id
    }

    /// Register an observer, replaying the current value first
    ///
    /// The replay runs under the registration lock, so a concurrent
    /// `notify` cannot fall between the replay and the registration: the
    /// observer sees every value as either the replay or a notification.
    pub(crate) fn add_and_replay<F>(
        &self,
        observer: Arc<dyn Fn(&T) + Send + Sync>,
        replay: F,
    ) -> SubscriptionId
    where
        F: FnOnce(&dyn Fn(&T)),
    {
        let mut entries = self.entries.write();
        replay(&*observer);
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) {
        self.entries.write().retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn notify(&self, value: &T) {
        // Snapshot the list so observers may subscribe/unsubscribe reentrantly
        let observers: Vec<Arc<dyn Fn(&T) + Send + Sync>> = self
            .entries
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(value);
        }
    }
}
