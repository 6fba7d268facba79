//! Reference `Registry` kept entirely in memory.
//!
//! Backs the CLI preview and the engine tests. Every successful mutating call bumps a
//! counter so callers can check that a pass changed nothing.

use std::collections::{BTreeMap, BTreeSet};

use switch_core::ShortcutSpec;

use crate::registry::{CommandHandle, GroupPath, Registry, RegistryError};

/// Observable registry contents, comparable across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub commands: BTreeMap<String, (String, String)>,
    pub groups: BTreeMap<GroupPath, BTreeSet<String>>,
    pub bindings: BTreeMap<String, BTreeSet<ShortcutSpec>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    commands: BTreeMap<String, CommandHandle>,
    groups: BTreeMap<GroupPath, BTreeSet<String>>,
    bindings: BTreeMap<String, BTreeSet<ShortcutSpec>>,
    rejected: BTreeSet<String>,
    mutations: usize,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard host menus present.
    pub fn with_host_menus() -> Self {
        let mut registry = Self::new();
        for menu in switch_config::HOST_MENUS {
            registry.add_menu(menu);
        }
        registry
    }

    /// Adds a host-owned top-level menu. Not counted as a mutation.
    pub fn add_menu(&mut self, menu: &str) {
        self.groups.entry(GroupPath::root(menu)).or_default();
    }

    /// Makes the host refuse to register `id`.
    pub fn reject_command(&mut self, id: &str) {
        self.rejected.insert(id.to_string());
    }

    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn group_members(&self, group: &GroupPath) -> Option<&BTreeSet<String>> {
        self.groups.get(group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&GroupPath, &BTreeSet<String>)> {
        self.groups.iter()
    }

    pub fn commands(&self) -> impl Iterator<Item = &CommandHandle> {
        self.commands.values()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            commands: self
                .commands
                .values()
                .map(|h| (h.id.clone(), (h.text.clone(), h.description.clone())))
                .collect(),
            groups: self.groups.clone(),
            bindings: self
                .bindings
                .iter()
                .filter(|(_, specs)| !specs.is_empty())
                .map(|(id, specs)| (id.clone(), specs.clone()))
                .collect(),
        }
    }

    fn require_command(&self, id: &str) -> Result<(), RegistryError> {
        if self.commands.contains_key(id) {
            Ok(())
        } else {
            Err(RegistryError::UnknownCommand(id.to_string()))
        }
    }
}

impl Registry for InMemoryRegistry {
    fn register_command(
        &mut self,
        id: &str,
        text: &str,
        description: &str,
    ) -> Result<CommandHandle, RegistryError> {
        if self.rejected.contains(id) {
            return Err(RegistryError::Rejected(format!("id '{id}' is reserved")));
        }
        if self.commands.contains_key(id) {
            return Err(RegistryError::DuplicateCommand(id.to_string()));
        }
        let handle = CommandHandle {
            id: id.to_string(),
            text: text.to_string(),
            description: description.to_string(),
        };
        self.commands.insert(id.to_string(), handle.clone());
        self.mutations += 1;
        Ok(handle)
    }

    fn update_command(
        &mut self,
        id: &str,
        text: &str,
        description: &str,
    ) -> Result<(), RegistryError> {
        let handle = self
            .commands
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownCommand(id.to_string()))?;
        handle.text = text.to_string();
        handle.description = description.to_string();
        self.mutations += 1;
        Ok(())
    }

    fn unregister_command(&mut self, id: &str) -> Result<(), RegistryError> {
        self.commands
            .remove(id)
            .ok_or_else(|| RegistryError::UnknownCommand(id.to_string()))?;
        self.mutations += 1;
        Ok(())
    }

    fn get_command(&self, id: &str) -> Option<CommandHandle> {
        self.commands.get(id).cloned()
    }

    fn attach_to_group(
        &mut self,
        group: &GroupPath,
        handle: &CommandHandle,
    ) -> Result<(), RegistryError> {
        self.require_command(&handle.id)?;
        let members = self
            .groups
            .get_mut(group)
            .ok_or_else(|| RegistryError::GroupNotFound(group.clone()))?;
        members.insert(handle.id.clone());
        self.mutations += 1;
        Ok(())
    }

    fn detach_from_group(
        &mut self,
        group: &GroupPath,
        handle: &CommandHandle,
    ) -> Result<(), RegistryError> {
        let members = self
            .groups
            .get_mut(group)
            .ok_or_else(|| RegistryError::GroupNotFound(group.clone()))?;
        members.remove(&handle.id);
        self.mutations += 1;
        Ok(())
    }

    fn find_or_create_group(
        &mut self,
        parent: &GroupPath,
        label: &str,
    ) -> Result<GroupPath, RegistryError> {
        if !self.groups.contains_key(parent) {
            return Err(RegistryError::GroupNotFound(parent.clone()));
        }
        let path = parent.child(label);
        if !self.groups.contains_key(&path) {
            self.groups.insert(path.clone(), BTreeSet::new());
            self.mutations += 1;
        }
        Ok(path)
    }

    fn set_shortcut(&mut self, id: &str, spec: ShortcutSpec) -> Result<(), RegistryError> {
        self.bindings.entry(id.to_string()).or_default().insert(spec);
        self.mutations += 1;
        Ok(())
    }

    fn remove_shortcut(&mut self, id: &str, spec: &ShortcutSpec) -> Result<(), RegistryError> {
        if let Some(specs) = self.bindings.get_mut(id) {
            specs.remove(spec);
        }
        self.mutations += 1;
        Ok(())
    }

    fn clear_shortcuts(&mut self, id: &str) -> Result<(), RegistryError> {
        self.bindings.remove(id);
        self.mutations += 1;
        Ok(())
    }

    fn shortcuts_of(&self, id: &str) -> Vec<ShortcutSpec> {
        self.bindings
            .get(id)
            .map(|specs| specs.iter().copied().collect())
            .unwrap_or_default()
    }

    fn find_commands_bound_to(&self, spec: &ShortcutSpec) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(_, specs)| specs.contains(spec))
            .map(|(id, _)| id.clone())
            .collect()
    }
}
