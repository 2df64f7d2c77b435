//! Scheduler backed by a tokio runtime.

use std::time::Duration;

use log::trace;
use tokio::runtime::Handle;
use tokio::runtime::TryCurrentError;

use super::Scheduler;
use super::Task;
use super::TaskHandle;

/// Runs each task on its own tokio task after sleeping for the delay.
///
/// The sleep races the handle's cancellation token, so a cancelled task
/// releases its timer immediately.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Creates a scheduler that spawns onto the given runtime.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates a scheduler for the runtime the caller is running in.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let task = handle.guard(task);
        let token = handle.token().clone();

        self.handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    trace!("scheduled task cancelled before {:?} elapsed", delay);
                }
                _ = tokio::time::sleep(delay) => task(),
            }
        });

        handle
    }
}
