use switch_app_core::{resolve, ActionContext, ProfileManager};
use switch_cli::commands::{reconcile_preview, render_preview};
use switch_core::{ActionKind, Platform, Profile};
use switch_persistence::FilePersistence;
use tempfile::tempdir;

// --- Helper Functions ---

fn manager(dir: &std::path::Path) -> ProfileManager<FilePersistence> {
    ProfileManager::new(FilePersistence::with_root(dir))
}

fn helix() -> Profile {
    Profile {
        id: "helix".into(),
        display_name: "Helix".into(),
        executable_path: "/opt/helix/hx".into(),
        open_file_shortcut: "ctrl alt h".into(),
        open_file_args_template: "\"{file}:{line}:{column}\" --vsplit".into(),
        ..Profile::default()
    }
}

// --- Tests ---

#[test]
fn added_profile_is_persisted_and_resolves_commands() {
    let dir = tempdir().unwrap();
    manager(dir.path()).add(helix()).unwrap();

    let mgr = manager(dir.path());
    let saved = mgr.find("helix").unwrap();
    assert_eq!(saved.open_file_shortcut, "ctrl alt H");

    let context = ActionContext::for_file("/src/app", "/src/app/my file.rs").at(12, 4);
    let command = resolve(ActionKind::OpenFile, Some(&saved), &context, Platform::Other).unwrap();
    assert_eq!(
        command.argv(),
        ["/opt/helix/hx", "/src/app/my file.rs:12:4", "--vsplit"]
    );

    let command = resolve(
        ActionKind::OpenProject,
        Some(&saved),
        &ActionContext::for_project("/src/my app"),
        Platform::MacOs,
    )
    .unwrap();
    assert_eq!(command.argv(), ["open", "-a", "/opt/helix/hx", "/src/my app"]);
}

#[test]
fn preview_follows_enable_and_disable() {
    let dir = tempdir().unwrap();
    let mgr = manager(dir.path());
    mgr.add(helix()).unwrap();
    mgr.set_enabled("cursor", false).unwrap();

    let (snapshot, report) = reconcile_preview(&mgr.list().unwrap());
    assert!(snapshot.commands.contains_key("OpenFileInHelix"));
    assert!(!snapshot.commands.contains_key("OpenFileInCursor"));
    assert!(report.issues.is_empty());

    let rendered = render_preview(&snapshot, &report);
    assert!(rendered.contains("ctrl alt H"));
}

#[test]
fn reset_discards_custom_profiles() {
    let dir = tempdir().unwrap();
    let mgr = manager(dir.path());
    mgr.add(helix()).unwrap();
    mgr.reset().unwrap();

    let ids: Vec<String> = mgr.list().unwrap().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, ["cursor", "vscode", "trae", "trae_cn"]);
}
