use std::sync::{Arc, Mutex, MutexGuard};

use switch_core::capture::{CaptureEvent, ShortcutCapture};
use switch_core::{Key, Modifiers};
use switch_infra::{Deferred, DeferredHandle};

/// Drives a [`ShortcutCapture`] field on a tokio runtime, moving focus on shortly
/// after a shortcut is captured.
pub struct CaptureSession {
    capture: Arc<Mutex<ShortcutCapture>>,
    pending: Option<DeferredHandle>,
}

impl CaptureSession {
    pub fn new(capture: ShortcutCapture) -> Self {
        Self {
            capture: Arc::new(Mutex::new(capture)),
            pending: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ShortcutCapture> {
        self.capture.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn text(&self) -> String {
        self.lock().text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.lock().set_text(text);
    }

    pub fn focus_gained(&mut self) {
        self.lock().start();
    }

    pub fn focus_lost(&mut self) {
        self.cancel_pending();
        self.lock().stop();
    }

    pub fn clear(&mut self) {
        self.cancel_pending();
        self.lock().clear();
    }

    /// Feeds a key press. When it captures a shortcut, `on_focus_transfer` runs once
    /// after the focus delay; a later capture replaces the earlier callback.
    /// Must be called from within a tokio runtime.
    pub fn key_pressed<F>(
        &mut self,
        modifiers: Modifiers,
        key: Option<Key>,
        on_focus_transfer: F,
    ) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let now = tokio::time::Instant::now().into_std();
        let Some(deadline) = self.lock().key_pressed(now, modifiers, key) else {
            return false;
        };

        self.cancel_timer();
        let capture = Arc::clone(&self.capture);
        self.pending = Some(Deferred::schedule(
            deadline.saturating_duration_since(now),
            move || {
                let now = tokio::time::Instant::now().into_std();
                let event = capture
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .poll(now);
                if event == Some(CaptureEvent::FocusTransfer) {
                    on_focus_transfer();
                }
            },
        ));
        true
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }

    fn cancel_pending(&mut self) {
        self.cancel_timer();
        self.lock().cancel();
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(ShortcutCapture::default())
    }
}
