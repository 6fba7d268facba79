use std::sync::Arc;

use anyhow::{anyhow, Result};
use switch_core::defaults::default_profiles;
use switch_core::{shortcut, ConfigError, Profile};
use tracing::{info, warn};

use crate::ports::{ProfilesRepo, ReconcilerPort};

/// Edits the saved profile list. Every successful change is persisted first, then
/// handed to the reconciler so the host registry follows.
pub struct ProfileManager<P> {
    repo: P,
    reconciler: Option<Arc<dyn ReconcilerPort>>,
}

impl<P: ProfilesRepo> ProfileManager<P> {
    pub fn new(repo: P) -> Self {
        Self {
            repo,
            reconciler: None,
        }
    }

    pub fn with_reconciler(mut self, reconciler: Arc<dyn ReconcilerPort>) -> Self {
        self.reconciler = Some(reconciler);
        self
    }

    pub fn list(&self) -> Result<Vec<Profile>> {
        self.repo.load()
    }

    pub fn find(&self, id: &str) -> Result<Profile> {
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow!("Profile '{}' not found", id))
    }

    pub fn add(&self, profile: Profile) -> Result<Profile> {
        let mut profiles = self.list()?;
        let profile = canonical(profile);
        profile.validate()?;
        if profiles.iter().any(|p| p.id == profile.id) {
            return Err(ConfigError::DuplicateId(profile.id).into());
        }

        profiles.push(profile.clone());
        self.commit(&profiles)?;
        info!("Added editor '{}' ({})", profile.display_name, profile.id);
        Ok(profile)
    }

    /// Replaces the profile with the same id.
    pub fn update(&self, profile: Profile) -> Result<Profile> {
        let mut profiles = self.list()?;
        let profile = canonical(profile);
        profile.validate()?;
        let slot = profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| anyhow!("Profile '{}' not found", profile.id))?;
        *slot = profile.clone();

        self.commit(&profiles)?;
        Ok(profile)
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        let mut profiles = self.list()?;
        let original_len = profiles.len();
        profiles.retain(|p| p.id != id);

        if profiles.len() == original_len {
            return Err(anyhow!("Profile '{}' not found", id));
        }

        self.commit(&profiles)?;
        info!("Removed editor '{id}'");
        Ok(())
    }

    pub fn set_enabled(&self, id: &str, enabled: bool) -> Result<Profile> {
        let mut profiles = self.list()?;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| anyhow!("Profile '{}' not found", id))?;
        profile.enabled = enabled;
        let updated = profile.clone();

        self.commit(&profiles)?;
        Ok(updated)
    }

    /// Replaces everything with the built-in catalogue.
    pub fn reset(&self) -> Result<Vec<Profile>> {
        let profiles = default_profiles();
        self.commit(&profiles)?;
        info!("Restored default editors");
        Ok(profiles)
    }

    fn commit(&self, profiles: &[Profile]) -> Result<()> {
        self.repo.save(profiles)?;
        if let Some(reconciler) = &self.reconciler {
            if let Err(e) = reconciler.request(profiles.to_vec()) {
                // Saved state is authoritative; the next change retries.
                warn!("Failed to queue reconciliation: {e:#}");
            }
        }
        Ok(())
    }
}

/// Stores parseable shortcuts in canonical form. Unparseable text is kept as typed.
fn canonical(mut profile: Profile) -> Profile {
    for text in [
        &mut profile.open_file_shortcut,
        &mut profile.open_project_shortcut,
    ] {
        if let Some(normalized) = shortcut::normalize(text) {
            *text = normalized;
        }
    }
    profile
}
