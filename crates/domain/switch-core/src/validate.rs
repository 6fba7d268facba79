use std::collections::HashSet;

use thiserror::Error;

use crate::Profile;

/// A profile (or profile set) that must not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Profile ID cannot be empty")]
    EmptyId,
    #[error("Profile ID '{0}' must use only a-z, 0-9, - and _")]
    InvalidId(String),
    #[error("Profile '{id}': {field} cannot be empty")]
    MissingField { id: String, field: &'static str },
    #[error("A profile with ID '{0}' already exists")]
    DuplicateId(String),
}

impl Profile {
    /// Required-field checks. Shortcut text is not checked here: an unparseable
    /// shortcut only disables the binding, never the profile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidId(self.id.clone()));
        }

        let required = [
            ("display name", &self.display_name),
            ("executable path", &self.executable_path),
            ("open-file arguments", &self.open_file_args_template),
            ("open-project arguments", &self.open_project_args_template),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    id: self.id.clone(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// Validates every profile and the uniqueness of ids.
pub fn validate_set(profiles: &[Profile]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for p in profiles {
        p.validate()?;
        if !seen.insert(p.id.as_str()) {
            return Err(ConfigError::DuplicateId(p.id.clone()));
        }
    }
    Ok(())
}
