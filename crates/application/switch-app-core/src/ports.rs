use switch_core::{EditorCommand, Profile};
use switch_infra::ActivationMode;

pub trait ProfilesRepo: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<Vec<Profile>>;
    fn save(&self, profiles: &[Profile]) -> anyhow::Result<()>;
}

pub trait LauncherPort: Send + Sync + 'static {
    /// Starts the process and returns once the OS accepted it.
    fn launch(&self, command: &EditorCommand) -> anyhow::Result<()>;
}

pub trait WindowActivatorPort: Send + Sync + 'static {
    /// Fire and forget; implementations must not block.
    fn activate(&self, process_name: &str, mode: ActivationMode);
}

/// Receives the full profile list after every saved change.
pub trait ReconcilerPort: Send + Sync + 'static {
    fn request(&self, desired: Vec<Profile>) -> anyhow::Result<()>;
}
