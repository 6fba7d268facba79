use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A callback scheduled to run once after a delay, unless cancelled first.
pub struct Deferred;

impl Deferred {
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> DeferredHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = tokio::time::sleep(delay) => callback(),
            }
        });
        DeferredHandle { token, task }
    }
}

/// Dropping the handle leaves the callback scheduled.
#[derive(Debug)]
pub struct DeferredHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl DeferredHandle {
    /// Prevents the callback from running if it has not fired yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// True once the callback has run or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
