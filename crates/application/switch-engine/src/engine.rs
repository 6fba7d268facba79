use std::collections::{BTreeMap, HashMap, HashSet};

use switch_config::{HOST_MENUS, MENU_GROUP_LABEL};
use switch_core::{shortcut, ActionKind, Profile, ProfileId, ShortcutSpec};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::registry::{CommandHandle, GroupPath, Registry, RegistryError};
use crate::report::{ReconcileIssue, ReconcileReport};

/// Where a command sits in one host menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub menu: String,
    pub group: GroupPath,
}

#[derive(Debug, Clone)]
pub struct RegisteredCommand {
    pub kind: ActionKind,
    pub handle: CommandHandle,
    pub placements: Vec<Placement>,
}

/// Live registry-side state derived from one enabled profile.
#[derive(Debug, Clone)]
pub struct RegisteredEntry {
    pub profile_id: ProfileId,
    pub display_name: String,
    pub commands: Vec<RegisteredCommand>,
}

impl RegisteredEntry {
    pub fn command(&self, kind: ActionKind) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|c| c.kind == kind)
    }
}

/// What a command's shortcut should be after this pass.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShortcutTarget {
    Unbound,
    Unparseable(String),
    Bind(ShortcutSpec),
    /// A later command in the desired set claimed the same shortcut.
    Yielded,
}

/// Converges a [`Registry`] onto a desired profile set.
///
/// Holds the registered-entry map for the lifetime of the host session. Each pass
/// diffs against both that map and the registry's current shortcut state, and only
/// issues a mutation where the two disagree, so repeating a pass is free.
pub struct ReconciliationEngine<R> {
    registry: R,
    registered: BTreeMap<ProfileId, RegisteredEntry>,
}

impl<R: Registry> ReconciliationEngine<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            registered: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn into_registry(self) -> R {
        self.registry
    }

    pub fn registered(&self) -> impl Iterator<Item = &RegisteredEntry> {
        self.registered.values()
    }

    pub fn entry(&self, profile_id: &str) -> Option<&RegisteredEntry> {
        self.registered.get(profile_id)
    }

    pub fn reconcile(&mut self, desired: &[Profile]) -> ReconcileReport {
        let mut report = ReconcileReport::new(Uuid::new_v4());
        let span = info_span!("reconcile", pass = %report.pass);
        let _guard = span.enter();

        info!(
            "Reconciliation started: {} profiles, {} registered",
            desired.len(),
            self.registered.len()
        );

        let enabled = unique_enabled(desired, &mut report);
        let wanted: HashSet<&str> = enabled.iter().map(|p| p.id.as_str()).collect();

        let stale: Vec<ProfileId> = self
            .registered
            .keys()
            .filter(|id| !wanted.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.unregister_profile(&id, &mut report);
        }

        let targets = plan_shortcuts(&enabled, &mut report);
        for profile in enabled {
            if self.registered.contains_key(&profile.id) {
                self.update_profile(profile, &targets, &mut report);
            } else {
                self.register_profile(profile, &targets, &mut report);
            }
        }

        info!(
            added = report.added.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            issues = report.issues.len(),
            "Reconciliation finished"
        );
        report
    }

    fn register_profile(
        &mut self,
        profile: &Profile,
        targets: &HashMap<String, ShortcutTarget>,
        report: &mut ReconcileReport,
    ) {
        info!("Registering commands for {}", profile.display_name);

        let mut handles: Vec<(ActionKind, CommandHandle)> = Vec::with_capacity(2);
        for kind in ActionKind::ALL {
            let id = kind.command_id(&profile.id);
            let registered = self.registry.register_command(
                &id,
                &kind.display_text(&profile.display_name),
                &kind.description(&profile.display_name),
            );
            match registered {
                Ok(handle) => handles.push((kind, handle)),
                Err(error) => {
                    fail(report, &profile.id, "register command", error);
                    // Both commands or neither.
                    for (_, handle) in &handles {
                        if let Err(error) = self.registry.unregister_command(&handle.id) {
                            fail(report, &profile.id, "roll back registration", error);
                        }
                    }
                    return;
                }
            }
        }

        let mut commands = Vec::with_capacity(handles.len());
        for (kind, handle) in handles {
            let mut command = RegisteredCommand {
                kind,
                handle,
                placements: Vec::new(),
            };
            place_missing(&mut self.registry, &profile.id, &mut command, report);
            apply_shortcut(
                &mut self.registry,
                &profile.id,
                &command.handle.id,
                targets.get(&command.handle.id),
                report,
            );
            commands.push(command);
        }

        self.registered.insert(
            profile.id.clone(),
            RegisteredEntry {
                profile_id: profile.id.clone(),
                display_name: profile.display_name.clone(),
                commands,
            },
        );
        report.added.push(profile.id.clone());
    }

    fn update_profile(
        &mut self,
        profile: &Profile,
        targets: &HashMap<String, ShortcutTarget>,
        report: &mut ReconcileReport,
    ) {
        let Some(entry) = self.registered.get_mut(&profile.id) else {
            return;
        };

        let mut changed = false;
        for command in entry.commands.iter_mut() {
            let text = command.kind.display_text(&profile.display_name);
            let description = command.kind.description(&profile.display_name);

            match self.registry.get_command(&command.handle.id) {
                Some(current) if current.text == text && current.description == description => {}
                Some(_) => {
                    match self
                        .registry
                        .update_command(&command.handle.id, &text, &description)
                    {
                        Ok(()) => {
                            command.handle.text = text;
                            command.handle.description = description;
                            changed = true;
                        }
                        Err(error) => fail(report, &profile.id, "update command", error),
                    }
                }
                None => {
                    warn!(
                        "Command {} is missing from the registry, registering it again",
                        command.handle.id
                    );
                    match self
                        .registry
                        .register_command(&command.handle.id, &text, &description)
                    {
                        Ok(handle) => {
                            command.handle = handle;
                            command.placements.clear();
                            changed = true;
                        }
                        Err(error) => {
                            fail(report, &profile.id, "register command", error);
                            continue;
                        }
                    }
                }
            }

            let placed_before = command.placements.len();
            place_missing(&mut self.registry, &profile.id, command, report);
            changed |= command.placements.len() != placed_before;

            changed |= apply_shortcut(
                &mut self.registry,
                &profile.id,
                &command.handle.id,
                targets.get(&command.handle.id),
                report,
            );
        }
        entry.display_name = profile.display_name.clone();

        if changed {
            info!("Updated configuration for {}", profile.display_name);
            report.updated.push(profile.id.clone());
        } else {
            debug!("{} already up to date", profile.display_name);
        }
    }

    fn unregister_profile(&mut self, profile_id: &str, report: &mut ReconcileReport) {
        let Some(entry) = self.registered.get_mut(profile_id) else {
            return;
        };
        info!("Unregistering commands for {}", entry.display_name);

        let mut complete = true;
        for command in entry.commands.iter_mut() {
            let handle = command.handle.clone();

            command.placements.retain(|placement| {
                match self.registry.detach_from_group(&placement.group, &handle) {
                    Ok(()) | Err(RegistryError::GroupNotFound(_)) => false,
                    Err(error) => {
                        fail(report, profile_id, "detach from menu", error);
                        true
                    }
                }
            });

            if !self.registry.shortcuts_of(&handle.id).is_empty() {
                if let Err(error) = self.registry.clear_shortcuts(&handle.id) {
                    fail(report, profile_id, "clear shortcuts", error);
                }
            }

            match self.registry.unregister_command(&handle.id) {
                Ok(()) | Err(RegistryError::UnknownCommand(_)) => {}
                Err(error) => {
                    complete = false;
                    fail(report, profile_id, "unregister command", error);
                }
            }
        }

        // A partially removed entry stays so the next pass retries it.
        if complete {
            self.registered.remove(profile_id);
            report.removed.push(profile_id.to_string());
        }
    }
}

/// Enabled profiles in sequence order, first occurrence of each id only. A profile
/// whose command ids are already taken by an earlier enabled profile is dropped.
fn unique_enabled<'a>(desired: &'a [Profile], report: &mut ReconcileReport) -> Vec<&'a Profile> {
    let mut seen = HashSet::new();
    let mut command_owners: HashMap<String, &str> = HashMap::new();
    let mut enabled = Vec::new();
    for profile in desired {
        if !seen.insert(profile.id.as_str()) {
            warn!("Duplicate profile id '{}' ignored", profile.id);
            report.issues.push(ReconcileIssue::DuplicateProfile {
                profile_id: profile.id.clone(),
            });
            continue;
        }
        if !profile.enabled {
            continue;
        }

        let command_id = ActionKind::OpenFile.command_id(&profile.id);
        if let Some(owner) = command_owners.get(&command_id) {
            warn!(
                "Profile '{}' collides with '{}' on {}, ignored",
                profile.id, owner, command_id
            );
            report.issues.push(ReconcileIssue::CommandIdCollision {
                profile_id: profile.id.clone(),
                command_id,
                owner: owner.to_string(),
            });
            continue;
        }
        command_owners.insert(command_id, profile.id.as_str());
        enabled.push(profile);
    }
    enabled
}

/// Decides every command's shortcut up front. Claims are taken in sequence order
/// (file before project within a profile); a later claim on an equal spec wins.
fn plan_shortcuts(
    enabled: &[&Profile],
    report: &mut ReconcileReport,
) -> HashMap<String, ShortcutTarget> {
    let mut targets = HashMap::new();
    let mut owners: HashMap<ShortcutSpec, String> = HashMap::new();

    for profile in enabled {
        for kind in ActionKind::ALL {
            let command_id = kind.command_id(&profile.id);
            let text = profile.shortcut_text(kind);

            let target = if text.trim().is_empty() {
                ShortcutTarget::Unbound
            } else {
                match shortcut::parse(text) {
                    None => ShortcutTarget::Unparseable(text.to_string()),
                    Some(spec) => {
                        if let Some(loser) = owners.insert(spec, command_id.clone()) {
                            warn!("Shortcut '{spec}' is claimed by {loser} and {command_id}; {command_id} wins");
                            report.issues.push(ReconcileIssue::ShortcutConflict {
                                shortcut: spec,
                                winner: command_id.clone(),
                                loser: loser.clone(),
                            });
                            targets.insert(loser, ShortcutTarget::Yielded);
                        }
                        ShortcutTarget::Bind(spec)
                    }
                }
            };
            targets.insert(command_id, target);
        }
    }
    targets
}

fn grouping<R: Registry>(
    registry: &mut R,
    menu: &str,
    kind: ActionKind,
) -> Result<GroupPath, RegistryError> {
    let top = registry.find_or_create_group(&GroupPath::root(menu), MENU_GROUP_LABEL)?;
    registry.find_or_create_group(&top, kind.group_label())
}

/// Attaches the command to every host menu it is not yet placed in.
fn place_missing<R: Registry>(
    registry: &mut R,
    profile_id: &str,
    command: &mut RegisteredCommand,
    report: &mut ReconcileReport,
) {
    for menu in HOST_MENUS {
        if command.placements.iter().any(|p| p.menu == menu) {
            continue;
        }
        let group = match grouping(registry, menu, command.kind) {
            Ok(group) => group,
            Err(error) => {
                fail(report, profile_id, "locate menu group", error);
                continue;
            }
        };
        match registry.attach_to_group(&group, &command.handle) {
            Ok(()) => {
                debug!("Added {} to {group}", command.handle.id);
                command.placements.push(Placement {
                    menu: menu.to_string(),
                    group,
                });
            }
            Err(error) => fail(report, profile_id, "attach to menu", error),
        }
    }
}

/// Brings one command's bindings to the target. Returns whether anything was mutated.
fn apply_shortcut<R: Registry>(
    registry: &mut R,
    profile_id: &str,
    command_id: &str,
    target: Option<&ShortcutTarget>,
    report: &mut ReconcileReport,
) -> bool {
    let wanted = match target {
        Some(ShortcutTarget::Bind(spec)) => Some(*spec),
        Some(ShortcutTarget::Unparseable(text)) => {
            warn!("Failed to parse shortcut '{text}' for action {command_id}");
            report.issues.push(ReconcileIssue::ShortcutUnparseable {
                profile_id: profile_id.to_string(),
                command_id: command_id.to_string(),
                text: text.clone(),
            });
            None
        }
        Some(ShortcutTarget::Unbound | ShortcutTarget::Yielded) | None => None,
    };

    let current = registry.shortcuts_of(command_id);
    let converged = match wanted {
        None => current.is_empty(),
        Some(spec) => {
            current == [spec] && registry.find_commands_bound_to(&spec) == [command_id]
        }
    };
    if converged {
        return false;
    }

    let mut mutated = false;
    if !current.is_empty() {
        if let Err(error) = registry.clear_shortcuts(command_id) {
            fail(report, profile_id, "clear shortcuts", error);
            return false;
        }
        mutated = true;
    }

    let Some(spec) = wanted else {
        debug!("Removed shortcuts for action {command_id}");
        return mutated;
    };

    for other in registry.find_commands_bound_to(&spec) {
        if other == command_id {
            continue;
        }
        warn!("Shortcut '{spec}' is already used by {other}, reassigning to {command_id}");
        match registry.remove_shortcut(&other, &spec) {
            Ok(()) => {
                mutated = true;
                report.issues.push(ReconcileIssue::ShortcutConflict {
                    shortcut: spec,
                    winner: command_id.to_string(),
                    loser: other,
                });
            }
            Err(error) => fail(report, profile_id, "strip conflicting shortcut", error),
        }
    }

    match registry.set_shortcut(command_id, spec) {
        Ok(()) => {
            info!("Set shortcut '{spec}' for action {command_id}");
            true
        }
        Err(error) => {
            fail(report, profile_id, "set shortcut", error);
            mutated
        }
    }
}

fn fail(
    report: &mut ReconcileReport,
    profile_id: &str,
    operation: &'static str,
    error: RegistryError,
) {
    warn!("Failed to {operation} for profile '{profile_id}': {error}");
    report.issues.push(ReconcileIssue::RegistryOperationFailed {
        profile_id: profile_id.to_string(),
        operation,
        error,
    });
}
