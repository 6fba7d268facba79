use std::sync::Mutex;

use switch_core::EditorCommand;
use switch_infra::{ActivationMode, ActivationOutcome, ProcessLauncher, WindowActivator};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::ports::{LauncherPort, WindowActivatorPort};

pub struct LauncherImpl {
    inner: ProcessLauncher,
}

impl Default for LauncherImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl LauncherImpl {
    pub fn new() -> Self {
        Self {
            inner: ProcessLauncher::new(),
        }
    }
}

impl LauncherPort for LauncherImpl {
    fn launch(&self, command: &EditorCommand) -> anyhow::Result<()> {
        self.inner.launch(command)?;
        Ok(())
    }
}

/// Schedules activation on the ambient tokio runtime, if there is one.
///
/// The most recent activation task is kept so short-lived callers can await it
/// before exiting; long-running hosts simply never collect it.
#[derive(Default)]
pub struct ActivatorImpl {
    inner: WindowActivator,
    pending: Mutex<Option<JoinHandle<ActivationOutcome>>>,
}

impl ActivatorImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the task started by the last `activate` call, if any.
    pub fn take_pending(&self) -> Option<JoinHandle<ActivationOutcome>> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

impl WindowActivatorPort for ActivatorImpl {
    fn activate(&self, process_name: &str, mode: ActivationMode) {
        if tokio::runtime::Handle::try_current().is_err() {
            debug!("No async runtime, skipping window activation");
            return;
        }
        let task = self.inner.spawn(process_name, mode);
        *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(task);
    }
}
