use std::thread::JoinHandle;

use switch_core::Profile;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::engine::ReconciliationEngine;
use crate::registry::Registry;
use crate::report::ReconcileReport;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("reconcile worker has stopped")]
    Closed,
    #[error("failed to start reconcile worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("reconcile worker panicked")]
    WorkerPanicked,
}

struct Job {
    desired: Vec<Profile>,
    reply: oneshot::Sender<ReconcileReport>,
}

/// Serialises reconciliation passes onto one dedicated thread.
///
/// Submissions run strictly in FIFO order and never overlap, so a burst of settings
/// changes converges on the last one submitted.
pub struct ReconcileQueue<R> {
    tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<ReconciliationEngine<R>>,
}

impl<R> ReconcileQueue<R>
where
    R: Registry + Send + 'static,
{
    pub fn start(engine: ReconciliationEngine<R>) -> Result<Self, QueueError> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let worker = std::thread::Builder::new()
            .name("switch-reconcile".into())
            .spawn(move || {
                let mut engine = engine;
                while let Some(job) = rx.blocking_recv() {
                    let report = engine.reconcile(&job.desired);
                    if job.reply.send(report).is_err() {
                        debug!("Reconcile report dropped, submitter went away");
                    }
                }
                engine
            })?;
        Ok(Self { tx, worker })
    }

    /// Queues a pass. The receiver resolves once the pass has run.
    pub fn submit(
        &self,
        desired: Vec<Profile>,
    ) -> Result<oneshot::Receiver<ReconcileReport>, QueueError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job { desired, reply })
            .map_err(|_| QueueError::Closed)?;
        Ok(rx)
    }

    /// Drains queued passes, stops the worker and hands the engine back.
    pub fn shutdown(self) -> Result<ReconciliationEngine<R>, QueueError> {
        drop(self.tx);
        self.worker.join().map_err(|_| {
            warn!("Reconcile worker panicked during shutdown");
            QueueError::WorkerPanicked
        })
    }
}
