//! On-disk shape of `profiles.json` and the fix-ups applied when loading it.

use serde::{Deserialize, Serialize};
use switch_config::SETTINGS_VERSION;
use switch_core::defaults::{default_for, default_profiles};
use switch_core::Profile;
use tracing::info;

fn current_version() -> u32 {
    SETTINGS_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Single-editor path written by releases that predate profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_path: Option<String>,
}

impl SettingsDocument {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            version: SETTINGS_VERSION,
            profiles,
            cursor_path: None,
        }
    }
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Turns whatever was on disk into a usable profile list.
///
/// Steps, in order: migrate a legacy `cursorPath`, restore default shortcuts on known
/// ids that have none, seed the catalogue when nothing is left, and make sure at least
/// one profile is enabled.
pub fn normalize(document: SettingsDocument) -> Vec<Profile> {
    let mut profiles = document.profiles;

    if profiles.is_empty() {
        if let Some(path) = document.cursor_path.filter(|p| !p.trim().is_empty()) {
            info!("Migrating legacy cursorPath '{path}' to a cursor profile");
            let mut cursor = default_for("cursor").unwrap_or_default();
            cursor.id = "cursor".into();
            cursor.display_name = "Cursor".into();
            cursor.executable_path = path;
            cursor.enabled = true;
            profiles.push(cursor);
        }
    }

    for profile in profiles.iter_mut() {
        if !profile.open_file_shortcut.is_empty() || !profile.open_project_shortcut.is_empty() {
            continue;
        }
        if let Some(preset) = default_for(&profile.id) {
            profile.open_file_shortcut = preset.open_file_shortcut;
            profile.open_project_shortcut = preset.open_project_shortcut;
        }
    }

    if profiles.is_empty() {
        info!("No profiles configured, using the default catalogue");
        profiles = default_profiles();
    }

    if !profiles.iter().any(|p| p.enabled) {
        let index = profiles.iter().position(|p| p.id == "cursor").unwrap_or(0);
        if let Some(profile) = profiles.get_mut(index) {
            profile.enabled = true;
            info!("Auto-enabled '{}' as no editors were enabled", profile.display_name);
        }
    }

    profiles
}
