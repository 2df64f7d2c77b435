//! Manually driven scheduler.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use log::trace;
use tokio_util::sync::CancellationToken;

use super::Scheduler;
use super::Task;
use super::TaskHandle;

struct Pending {
    deadline: Duration,
    seq: u64,
    token: CancellationToken,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_seq: u64,
    pending: Vec<Pending>,
}

/// A scheduler with a virtual clock.
///
/// Nothing runs until [`advance`](ManualScheduler::advance) is called; due
/// tasks then run on the caller's thread in deadline order (ties in
/// scheduling order). Clones share the same clock.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tablesync_lib::schedule::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
///
/// let _handle = scheduler.schedule(
///     Duration::from_millis(500),
///     Box::new(move || flag.store(true, Ordering::SeqCst)),
/// );
///
/// scheduler.advance(Duration::from_millis(499));
/// assert!(!fired.load(Ordering::SeqCst));
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

impl ManualScheduler {
    /// Creates a scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Returns the number of tasks still waiting to run.
    pub fn pending_count(&self) -> usize {
        self.lock()
            .pending
            .iter()
            .filter(|p| !p.token.is_cancelled())
            .count()
    }

    /// Advances the clock, running every task that comes due.
    ///
    /// Tasks scheduled by a running task also run if they come due within
    /// the same advance. Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut ran = 0;

        loop {
            let next = {
                let mut clock = self.lock();
                clock.pending.retain(|p| !p.token.is_cancelled());
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.deadline <= target)
                    .min_by_key(|(_, p)| (p.deadline, p.seq))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let pending = clock.pending.remove(index);
                        clock.now = pending.deadline;
                        Some(pending.task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };

            match next {
                // Run outside the lock so the task may schedule more work.
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }

        trace!("manual scheduler advanced to {:?}, ran {} task(s)", target, ran);
        ran
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Clock> {
        self.clock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let task = handle.guard(task);

        let mut clock = self.lock();
        let seq = clock.next_seq;
        clock.next_seq += 1;
        let deadline = clock.now + delay;
        clock.pending.push(Pending {
            deadline,
            seq,
            token: handle.token().clone(),
            task,
        });

        handle
    }
}
