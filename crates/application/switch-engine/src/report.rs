use switch_core::{ProfileId, ShortcutSpec};
use uuid::Uuid;

use crate::registry::RegistryError;

/// Something that went wrong for one profile during a pass. None of these stop the pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileIssue {
    #[error("profile '{profile_id}': shortcut '{text}' for {command_id} could not be parsed")]
    ShortcutUnparseable {
        profile_id: ProfileId,
        command_id: String,
        text: String,
    },
    #[error("shortcut '{shortcut}' moved from {loser} to {winner}")]
    ShortcutConflict {
        shortcut: ShortcutSpec,
        winner: String,
        loser: String,
    },
    #[error("profile '{profile_id}': {operation} failed: {error}")]
    RegistryOperationFailed {
        profile_id: ProfileId,
        operation: &'static str,
        error: RegistryError,
    },
    #[error("profile id '{profile_id}' appears more than once; later copies ignored")]
    DuplicateProfile { profile_id: ProfileId },
    #[error("profile '{profile_id}' maps to command {command_id}, already used by profile '{owner}'; ignored")]
    CommandIdCollision {
        profile_id: ProfileId,
        command_id: String,
        owner: ProfileId,
    },
}

impl ReconcileIssue {
    /// Conflicts are resolved automatically; everything else left something undone.
    pub fn is_failure(&self) -> bool {
        !matches!(self, ReconcileIssue::ShortcutConflict { .. })
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub pass: Uuid,
    pub added: Vec<ProfileId>,
    pub updated: Vec<ProfileId>,
    pub removed: Vec<ProfileId>,
    pub issues: Vec<ReconcileIssue>,
}

impl ReconcileReport {
    pub fn new(pass: Uuid) -> Self {
        Self {
            pass,
            ..Self::default()
        }
    }

    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReconcileIssue> {
        self.issues.iter().filter(|i| i.is_failure())
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ReconcileIssue> {
        self.issues.iter().filter(|i| !i.is_failure())
    }
}
