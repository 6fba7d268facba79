//! Shortcut capture field state: record one key combination, then hand focus on
//! after a short delay so the user can see what was captured.
//!
//! Time is passed in explicitly; a driver polls (or schedules a callback for) the
//! deadline returned from [`ShortcutCapture::key_pressed`].

use std::time::{Duration, Instant};

use crate::shortcut::{self, Key, Modifiers, ShortcutSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    /// A shortcut was captured; focus moves on at `deadline` unless cancelled.
    PendingFocus { deadline: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    FocusTransfer,
}

#[derive(Debug, Clone)]
pub struct ShortcutCapture {
    state: CaptureState,
    recorded: Option<ShortcutSpec>,
    focus_delay: Duration,
}

impl Default for ShortcutCapture {
    fn default() -> Self {
        Self::new(switch_config::CAPTURE_FOCUS_DELAY)
    }
}

impl ShortcutCapture {
    pub fn new(focus_delay: Duration) -> Self {
        Self {
            state: CaptureState::Idle,
            recorded: None,
            focus_delay,
        }
    }

    /// Loads persisted text; unparseable text shows as empty.
    pub fn set_text(&mut self, text: &str) {
        self.recorded = shortcut::parse(text);
    }

    pub fn text(&self) -> String {
        self.recorded
            .as_ref()
            .map(shortcut::format)
            .unwrap_or_default()
    }

    pub fn spec(&self) -> Option<&ShortcutSpec> {
        self.recorded.as_ref()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        !matches!(self.state, CaptureState::Idle)
    }

    /// Field gained focus.
    pub fn start(&mut self) {
        self.state = CaptureState::Recording;
    }

    /// Field lost focus; any pending transfer is dropped.
    pub fn stop(&mut self) {
        self.state = CaptureState::Idle;
    }

    /// Handles a key press. `key` is `None` for a bare modifier press, which is ignored.
    /// Returns the focus-transfer deadline when a shortcut was captured; a later
    /// capture replaces an earlier deadline.
    pub fn key_pressed(
        &mut self,
        now: Instant,
        modifiers: Modifiers,
        key: Option<Key>,
    ) -> Option<Instant> {
        if !self.is_recording() {
            return None;
        }
        let spec = key.and_then(|key| ShortcutSpec::new(modifiers, key))?;
        self.recorded = Some(spec);
        let deadline = now + self.focus_delay;
        self.state = CaptureState::PendingFocus { deadline };
        Some(deadline)
    }

    /// Fires the focus transfer once the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<CaptureEvent> {
        match self.state {
            CaptureState::PendingFocus { deadline } if now >= deadline => {
                self.state = CaptureState::Idle;
                Some(CaptureEvent::FocusTransfer)
            }
            _ => None,
        }
    }

    /// Disarms a pending transfer but keeps recording.
    pub fn cancel(&mut self) {
        if let CaptureState::PendingFocus { .. } = self.state {
            self.state = CaptureState::Recording;
        }
    }

    pub fn clear(&mut self) {
        self.recorded = None;
        self.cancel();
    }
}
