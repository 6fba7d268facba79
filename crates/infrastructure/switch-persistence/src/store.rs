use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use switch_config::{CONFIG_APP, CONFIG_ORG, CONFIG_QUALIFIER, PROFILES_FILE, SETTINGS_VERSION};
use switch_core::{validate_set, Profile};
use tracing::{debug, info};

use crate::document::{normalize, SettingsDocument};
use crate::error::StorageError;

/// Profiles stored as JSON under the per-user configuration directory.
#[derive(Debug, Clone, Default)]
pub struct FilePersistence {
    root: Option<PathBuf>,
}

impl FilePersistence {
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Stores everything under `root` instead of the platform config dir.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn config_dir(&self) -> Result<PathBuf, StorageError> {
        let dir = match &self.root {
            Some(root) => root.clone(),
            None => ProjectDirs::from(CONFIG_QUALIFIER, CONFIG_ORG, CONFIG_APP)
                .ok_or(StorageError::NoConfigDir)?
                .config_dir()
                .to_path_buf(),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    pub fn profiles_path(&self) -> Result<PathBuf, StorageError> {
        Ok(self.config_dir()?.join(PROFILES_FILE))
    }

    /// Loads and normalises the saved profiles. A missing file yields the default
    /// catalogue; an unreadable one is an error rather than silently replaced.
    pub fn load_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let path = self.profiles_path()?;
        if !path.exists() {
            debug!("{} not found, using defaults", path.display());
            return Ok(normalize(SettingsDocument::default()));
        }

        let content = fs::read_to_string(&path)?;
        let document: SettingsDocument = serde_json::from_str(&content)?;
        if document.version > SETTINGS_VERSION {
            return Err(StorageError::NewerVersion {
                found: document.version,
                supported: SETTINGS_VERSION,
            });
        }
        Ok(normalize(document))
    }

    pub fn save_profiles(&self, profiles: &[Profile]) -> Result<(), StorageError> {
        validate_set(profiles)?;
        let path = self.profiles_path()?;
        let json = serde_json::to_string_pretty(&SettingsDocument::new(profiles.to_vec()))?;
        atomic_write(&path, json.as_bytes())?;
        info!("Saved {} profiles to {}", profiles.len(), path.display());
        Ok(())
    }
}

fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)?;
        }
        Err(e) => {
            fs::remove_file(&tmp_path).ok();
            return Err(e.into());
        }
    }

    if let Some(parent) = path.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
