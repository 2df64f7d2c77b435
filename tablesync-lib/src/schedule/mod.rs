//! Cancellable scheduled tasks.
//!
//! A [`Scheduler`] runs a callback once after a delay and returns a
//! [`TaskHandle`] that can cancel it. The coordinator uses this through a
//! [`Debouncer`] so that at most one settle task is outstanding at a time.
//!
//! - [`TokioScheduler`] - spawns onto a tokio runtime
//! - [`ManualScheduler`] - virtual clock advanced by hand

mod debounce;
mod manual;
mod runtime;

pub use debounce::Debouncer;
pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A callback run once by a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedules `task` to run once after `delay`.
    ///
    /// The task is cancelled when the returned handle is cancelled or
    /// dropped, unless the handle was detached.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

/// Handle to a scheduled task.
///
/// Dropping the handle cancels the task. Use [`detach`](TaskHandle::detach)
/// to let it run unobserved.
#[derive(Debug)]
pub struct TaskHandle {
    token: CancellationToken,
    finished: Arc<AtomicBool>,
    detached: bool,
}

impl TaskHandle {
    /// Creates a handle for a task that has not been scheduled yet.
    ///
    /// Scheduler implementations wrap the task with [`guard`](Self::guard)
    /// and watch [`token`](Self::token) while waiting.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            finished: Arc::new(AtomicBool::new(false)),
            detached: false,
        }
    }

    /// Wraps a task so it does nothing once cancelled and marks the handle
    /// finished when it runs.
    pub fn guard(&self, task: Task) -> Task {
        let token = self.token.clone();
        let finished = Arc::clone(&self.finished);
        Box::new(move || {
            if token.is_cancelled() {
                return;
            }
            finished.store(true, Ordering::SeqCst);
            task();
        })
    }

    /// Returns the cancellation token watched by the scheduler.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels the task if it has not started yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` if the task was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns `true` if the task has started running.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Returns `true` if the task is still waiting to run.
    pub fn is_pending(&self) -> bool {
        !self.is_cancelled() && !self.is_finished()
    }

    /// Lets the task run even though the handle is dropped.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if !self.detached {
            self.token.cancel();
        }
    }
}
