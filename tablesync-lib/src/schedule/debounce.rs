//! Keyed debouncing on top of a scheduler.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use log::trace;

use super::Scheduler;
use super::Task;
use super::TaskHandle;

/// Delays tasks until their key has been quiet for the debounce window.
///
/// Calling [`call`](Debouncer::call) again with the same key cancels the
/// previous task and restarts the window, so at most one task per key is
/// outstanding. Dropping the debouncer cancels everything still pending.
pub struct Debouncer<K> {
    scheduler: Arc<dyn Scheduler>,
    delay: Duration,
    pending: HashMap<K, TaskHandle>,
}

impl<K: Eq + Hash + std::fmt::Debug> Debouncer<K> {
    /// Creates a debouncer with the given quiescence window.
    pub fn new(scheduler: Arc<dyn Scheduler>, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            pending: HashMap::new(),
        }
    }

    /// Schedules `task` for `key`, replacing any task still pending for it.
    pub fn call(&mut self, key: K, task: Task) {
        let handle = self.scheduler.schedule(self.delay, task);
        if let Some(previous) = self.pending.insert(key, handle) {
            if previous.is_pending() {
                trace!("debounce window restarted");
            }
            previous.cancel();
        }
    }

    /// Cancels the pending task for `key`. Returns `true` if one was waiting.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.pending.remove(key) {
            Some(handle) => {
                let was_pending = handle.is_pending();
                handle.cancel();
                was_pending
            }
            None => false,
        }
    }

    /// Cancels every pending task.
    pub fn cancel_all(&mut self) {
        for (key, handle) in self.pending.drain() {
            if handle.is_pending() {
                trace!("cancelling pending debounce for {:?}", key);
            }
            handle.cancel();
        }
    }

    /// Returns `true` if a task for `key` is still waiting to run.
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.get(key).is_some_and(TaskHandle::is_pending)
    }

    /// Returns the quiescence window.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<K> std::fmt::Debug for Debouncer<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("keys", &self.pending.len())
            .finish()
    }
}
