use switch_core::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,
    #[error("profiles.json is from a newer version (version={found}, supported={supported})")]
    NewerVersion { found: u32, supported: u32 },
    #[error("refusing to save invalid profiles: {0}")]
    Invalid(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Unavailable,
    NewerVersion,
    Invalid,
    Io,
    Codec,
}

impl StorageError {
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::NoConfigDir => StorageErrorKind::Unavailable,
            StorageError::NewerVersion { .. } => StorageErrorKind::NewerVersion,
            StorageError::Invalid(_) => StorageErrorKind::Invalid,
            StorageError::Io(_) => StorageErrorKind::Io,
            StorageError::Serde(_) => StorageErrorKind::Codec,
        }
    }
}
