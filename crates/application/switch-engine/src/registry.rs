use std::fmt;

use switch_core::ShortcutSpec;

/// Location of a menu grouping: a host menu id followed by grouping labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupPath(Vec<String>);

impl GroupPath {
    pub fn root(menu: &str) -> Self {
        Self(vec![menu.to_string()])
    }

    pub fn child(&self, label: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(label.to_string());
        Self(segments)
    }

    pub fn parent(&self) -> Option<GroupPath> {
        (self.0.len() > 1).then(|| Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// The host menu this path lives under.
    pub fn menu(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" / "))
    }
}

/// What the host knows about a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHandle {
    pub id: String,
    pub text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("command '{0}' is not registered")]
    UnknownCommand(String),
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),
    #[error("menu group '{0}' does not exist")]
    GroupNotFound(GroupPath),
    #[error("host rejected the operation: {0}")]
    Rejected(String),
}

/// The host's command, menu and keymap store.
///
/// Implementations only store what they are told; the reconciliation engine owns
/// the lifecycle of everything it registers. Shortcut bindings may reference any
/// command id, including host commands the engine did not register.
pub trait Registry {
    fn register_command(
        &mut self,
        id: &str,
        text: &str,
        description: &str,
    ) -> Result<CommandHandle, RegistryError>;

    /// Updates presentation text in place.
    fn update_command(
        &mut self,
        id: &str,
        text: &str,
        description: &str,
    ) -> Result<(), RegistryError>;

    fn unregister_command(&mut self, id: &str) -> Result<(), RegistryError>;

    fn get_command(&self, id: &str) -> Option<CommandHandle>;

    fn attach_to_group(
        &mut self,
        group: &GroupPath,
        handle: &CommandHandle,
    ) -> Result<(), RegistryError>;

    fn detach_from_group(
        &mut self,
        group: &GroupPath,
        handle: &CommandHandle,
    ) -> Result<(), RegistryError>;

    /// Returns the child grouping labelled `label` under `parent`, creating it only
    /// when absent. Fails if `parent` itself does not exist.
    fn find_or_create_group(
        &mut self,
        parent: &GroupPath,
        label: &str,
    ) -> Result<GroupPath, RegistryError>;

    fn set_shortcut(&mut self, id: &str, spec: ShortcutSpec) -> Result<(), RegistryError>;

    /// Strips a single binding from a command.
    fn remove_shortcut(&mut self, id: &str, spec: &ShortcutSpec) -> Result<(), RegistryError>;

    fn clear_shortcuts(&mut self, id: &str) -> Result<(), RegistryError>;

    fn shortcuts_of(&self, id: &str) -> Vec<ShortcutSpec>;

    fn find_commands_bound_to(&self, spec: &ShortcutSpec) -> Vec<String>;
}
