use std::fmt::Write as _;

use anyhow::{anyhow, Result};
use switch_app_core::{
    resolve, ActionContext, ActionDispatcher, ActivatorImpl, LauncherImpl, ProfilesRepo,
};
use switch_core::{shortcut, ActionKind, EditorCommand, Platform, Profile};
use switch_engine::{InMemoryRegistry, ReconcileReport, ReconciliationEngine, RegistrySnapshot};
use switch_infra::ActivationMode;
use switch_persistence::FilePersistence;

pub struct OpenRequest {
    pub kind: ActionKind,
    pub profile_id: String,
    pub context: ActionContext,
    pub quick: bool,
    pub dry_run: bool,
}

fn printable(command: &EditorCommand) -> String {
    shlex::try_join(command.argv().iter().map(String::as_str))
        .unwrap_or_else(|_| command.to_string())
}

pub async fn cmd_open(store: &FilePersistence, request: OpenRequest) -> Result<()> {
    let profiles = store.load()?;
    let profile = profiles.iter().find(|p| p.id == request.profile_id);
    if profile.is_none() {
        return Err(anyhow!("Profile '{}' not found", request.profile_id));
    }

    if request.dry_run {
        let command = resolve(request.kind, profile, &request.context, Platform::current())?;
        println!("{}", printable(&command));
        return Ok(());
    }

    let mode = if request.quick {
        ActivationMode::Quick
    } else {
        ActivationMode::Thorough
    };
    let dispatcher = ActionDispatcher::new(LauncherImpl::new(), ActivatorImpl::new());
    let command = dispatcher.perform(request.kind, profile, &request.context, mode)?;
    println!(":: Launched {}", printable(&command));

    // The process exits next, which would abort the activation task.
    if let Some(task) = dispatcher.activator().take_pending() {
        match task.await {
            Ok(outcome) => tracing::debug!(?outcome, "Window activation"),
            Err(e) => tracing::warn!("Window activation task failed: {e}"),
        }
    }
    Ok(())
}

/// Runs one pass against an in-memory registry and renders the result.
pub fn reconcile_preview(profiles: &[Profile]) -> (RegistrySnapshot, ReconcileReport) {
    let mut engine = ReconciliationEngine::new(InMemoryRegistry::with_host_menus());
    let report = engine.reconcile(profiles);
    (engine.registry().snapshot(), report)
}

pub fn render_preview(snapshot: &RegistrySnapshot, report: &ReconcileReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Commands:");
    for (id, (text, _)) in &snapshot.commands {
        let keys: Vec<String> = snapshot
            .bindings
            .get(id)
            .map(|specs| specs.iter().map(shortcut::format).collect())
            .unwrap_or_default();
        let _ = writeln!(out, "  {:<28} {:<36} {}", id, text, keys.join(", "));
    }

    let _ = writeln!(out, "Menus:");
    for (group, members) in &snapshot.groups {
        if members.is_empty() {
            continue;
        }
        let members: Vec<&str> = members.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  {group}: {}", members.join(", "));
    }

    if !report.issues.is_empty() {
        let _ = writeln!(out, "Issues:");
        for issue in &report.issues {
            let _ = writeln!(out, "  {issue}");
        }
    }
    out
}

pub fn cmd_reconcile(store: &FilePersistence) -> Result<()> {
    let profiles = store.load()?;
    let (snapshot, report) = reconcile_preview(&profiles);
    print!("{}", render_preview(&snapshot, &report));
    Ok(())
}

pub fn cmd_shortcut(words: &[String]) -> Result<()> {
    let text = words.join(" ");
    match shortcut::normalize(&text) {
        Some(canonical) if canonical.is_empty() => println!("(no shortcut)"),
        Some(canonical) => println!("{canonical}"),
        None => return Err(anyhow!("Shortcut '{}' could not be parsed", text)),
    }
    Ok(())
}
