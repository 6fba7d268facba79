use switch_core::defaults::default_profiles;
use switch_core::shortcut::parse;
use switch_core::{ActionKind, Profile};
use switch_engine::{
    GroupPath, InMemoryRegistry, ReconcileIssue, ReconcileQueue, ReconciliationEngine, Registry,
};

// --- Helper Functions ---

fn profile(id: &str, name: &str, file_shortcut: &str, project_shortcut: &str) -> Profile {
    Profile {
        id: id.to_string(),
        display_name: name.to_string(),
        executable_path: id.to_string(),
        open_file_shortcut: file_shortcut.to_string(),
        open_project_shortcut: project_shortcut.to_string(),
        ..Profile::default()
    }
}

fn engine() -> ReconciliationEngine<InMemoryRegistry> {
    ReconciliationEngine::new(InMemoryRegistry::with_host_menus())
}

fn leaf(menu: &str, label: &str) -> GroupPath {
    GroupPath::root(menu).child("Switch2Cursor").child(label)
}

// --- Tests ---

#[test]
fn first_pass_registers_commands_groups_and_shortcuts() {
    let mut engine = engine();
    let report = engine.reconcile(&default_profiles());

    assert_eq!(report.added, vec!["cursor", "vscode", "trae", "trae_cn"]);
    assert!(report.issues.is_empty(), "{:?}", report.issues);

    let registry = engine.registry();
    assert_eq!(registry.commands().count(), 8);
    // 3 host roots, 3 top-level groupings, 6 sub-groupings.
    assert_eq!(registry.groups().count(), 12);

    for menu in switch_config::HOST_MENUS {
        let files = registry.group_members(&leaf(menu, "Open File")).unwrap();
        assert_eq!(files.len(), 4);
        assert!(files.contains("OpenFileInCursor"));
        let projects = registry.group_members(&leaf(menu, "Open Project")).unwrap();
        assert!(projects.contains("OpenProjectInTrae_cn"));
    }

    let cursor = registry.get_command("OpenFileInCursor").unwrap();
    assert_eq!(cursor.text, "Open File In Cursor");
    assert_eq!(cursor.description, "Open current file in Cursor");
    assert_eq!(
        registry.shortcuts_of("OpenProjectInVscode"),
        vec![parse("ctrl alt shift F2").unwrap()]
    );

    let entry = engine.entry("cursor").unwrap();
    let placements = &entry.command(ActionKind::OpenFile).unwrap().placements;
    assert_eq!(placements.len(), 3);
}

#[test]
fn repeating_a_pass_issues_no_mutations() {
    let mut engine = engine();
    let profiles = default_profiles();
    engine.reconcile(&profiles);
    let before = engine.registry().mutations();
    let snapshot = engine.registry().snapshot();

    let report = engine.reconcile(&profiles);

    assert!(report.is_noop());
    assert!(report.issues.is_empty());
    assert_eq!(engine.registry().mutations(), before);
    assert_eq!(engine.registry().snapshot(), snapshot);
}

#[test]
fn later_profile_wins_a_shared_shortcut() {
    let mut engine = engine();
    let profiles = vec![
        profile("a", "A", "alt shift F1", ""),
        profile("b", "B", "shift alt F1", ""),
    ];
    let report = engine.reconcile(&profiles);

    let spec = parse("alt shift F1").unwrap();
    assert_eq!(
        engine.registry().find_commands_bound_to(&spec),
        vec!["OpenFileInB".to_string()]
    );
    assert!(engine.registry().shortcuts_of("OpenFileInA").is_empty());

    let conflicts: Vec<_> = report.conflicts().collect();
    assert_eq!(
        conflicts,
        vec![&ReconcileIssue::ShortcutConflict {
            shortcut: spec,
            winner: "OpenFileInB".into(),
            loser: "OpenFileInA".into(),
        }]
    );
    assert_eq!(report.failures().count(), 0);

    let before = engine.registry().mutations();
    engine.reconcile(&profiles);
    assert_eq!(engine.registry().mutations(), before);
}

#[test]
fn disabling_then_enabling_restores_the_same_registry_state() {
    let mut engine = engine();
    let mut profiles = default_profiles();
    engine.reconcile(&profiles);
    let original = engine.registry().snapshot();

    profiles[1].enabled = false;
    let report = engine.reconcile(&profiles);
    assert_eq!(report.removed, vec!["vscode"]);
    assert!(engine.registry().get_command("OpenFileInVscode").is_none());
    assert!(engine
        .registry()
        .shortcuts_of("OpenProjectInVscode")
        .is_empty());
    assert!(!engine
        .registry()
        .group_members(&leaf("ToolsMenu", "Open File"))
        .unwrap()
        .contains("OpenFileInVscode"));

    profiles[1].enabled = true;
    let report = engine.reconcile(&profiles);
    assert_eq!(report.added, vec!["vscode"]);
    assert_eq!(engine.registry().snapshot(), original);
}

#[test]
fn removing_every_profile_leaves_empty_groupings_behind() {
    let mut engine = engine();
    engine.reconcile(&default_profiles());
    let report = engine.reconcile(&[]);

    assert_eq!(report.removed.len(), 4);
    assert_eq!(engine.registry().commands().count(), 0);
    assert!(engine.registry().snapshot().bindings.is_empty());
    assert_eq!(engine.registry().groups().count(), 12);
    assert_eq!(engine.registered().count(), 0);
}

#[test]
fn groupings_are_never_duplicated_across_passes() {
    let mut engine = engine();
    let mut profiles = default_profiles();
    for _ in 0..3 {
        engine.reconcile(&profiles);
        profiles.rotate_left(1);
    }
    engine.reconcile(&[]);
    engine.reconcile(&profiles);
    assert_eq!(engine.registry().groups().count(), 12);
}

#[test]
fn host_command_loses_its_binding_to_a_profile() {
    let mut registry = InMemoryRegistry::with_host_menus();
    let spec = parse("ctrl s").unwrap();
    registry.set_shortcut("SaveAll", spec).unwrap();

    let mut engine = ReconciliationEngine::new(registry);
    let report = engine.reconcile(&[profile("zed", "Zed", "ctrl S", "")]);

    assert!(engine.registry().shortcuts_of("SaveAll").is_empty());
    assert_eq!(
        engine.registry().find_commands_bound_to(&spec),
        vec!["OpenFileInZed".to_string()]
    );
    assert!(report.issues.contains(&ReconcileIssue::ShortcutConflict {
        shortcut: spec,
        winner: "OpenFileInZed".into(),
        loser: "SaveAll".into(),
    }));
}

#[test]
fn unparseable_shortcut_keeps_profile_active_without_binding() {
    let mut engine = engine();
    let profiles = vec![profile("zed", "Zed", "ctrl banana", "alt shift F7")];
    let report = engine.reconcile(&profiles);

    assert_eq!(report.added, vec!["zed"]);
    assert!(engine.registry().get_command("OpenFileInZed").is_some());
    assert!(engine.registry().shortcuts_of("OpenFileInZed").is_empty());
    assert_eq!(engine.registry().shortcuts_of("OpenProjectInZed").len(), 1);
    assert!(matches!(
        report.failures().next(),
        Some(ReconcileIssue::ShortcutUnparseable { text, .. }) if text == "ctrl banana"
    ));

    let before = engine.registry().mutations();
    let again = engine.reconcile(&profiles);
    assert_eq!(engine.registry().mutations(), before);
    assert_eq!(again.failures().count(), 1);
}

#[test]
fn rejected_registration_skips_one_profile_only() {
    let mut registry = InMemoryRegistry::with_host_menus();
    registry.reject_command("OpenProjectInVscode");
    let mut engine = ReconciliationEngine::new(registry);

    let report = engine.reconcile(&default_profiles());

    assert_eq!(report.added, vec!["cursor", "trae", "trae_cn"]);
    assert!(engine.entry("vscode").is_none());
    // The file command registered first is rolled back.
    assert!(engine.registry().get_command("OpenFileInVscode").is_none());
    assert!(matches!(
        report.failures().next(),
        Some(ReconcileIssue::RegistryOperationFailed { profile_id, operation: "register command", .. })
            if profile_id == "vscode"
    ));
}

#[test]
fn missing_host_menu_is_skipped_per_placement() {
    let mut registry = InMemoryRegistry::new();
    registry.add_menu("ToolsMenu");
    let mut engine = ReconciliationEngine::new(registry);

    let report = engine.reconcile(&[profile("zed", "Zed", "", "")]);

    assert_eq!(report.added, vec!["zed"]);
    let entry = engine.entry("zed").unwrap();
    for command in &entry.commands {
        assert_eq!(command.placements.len(), 1);
        assert_eq!(command.placements[0].menu, "ToolsMenu");
    }
    assert_eq!(report.failures().count(), 4);

    // Once the host menu shows up the next pass fills in the gap.
    engine.registry_mut().add_menu("EditorPopupMenu");
    let report = engine.reconcile(&[profile("zed", "Zed", "", "")]);
    assert_eq!(report.updated, vec!["zed"]);
    assert_eq!(
        engine.entry("zed").unwrap().commands[0].placements.len(),
        2
    );
}

#[test]
fn renaming_a_profile_updates_presentation_in_place() {
    let mut engine = engine();
    let mut profiles = vec![profile("zed", "Zed", "alt shift F7", "")];
    engine.reconcile(&profiles);

    profiles[0].display_name = "Zed Preview".into();
    let report = engine.reconcile(&profiles);

    assert_eq!(report.updated, vec!["zed"]);
    let command = engine.registry().get_command("OpenFileInZed").unwrap();
    assert_eq!(command.text, "Open File In Zed Preview");
    assert_eq!(engine.entry("zed").unwrap().display_name, "Zed Preview");
    assert_eq!(engine.registry().shortcuts_of("OpenFileInZed").len(), 1);
}

#[test]
fn changing_a_shortcut_rebinds_and_clearing_it_unbinds() {
    let mut engine = engine();
    let mut profiles = vec![profile("zed", "Zed", "alt shift F7", "")];
    engine.reconcile(&profiles);

    profiles[0].open_file_shortcut = "meta F8".into();
    engine.reconcile(&profiles);
    assert_eq!(
        engine.registry().shortcuts_of("OpenFileInZed"),
        vec![parse("meta F8").unwrap()]
    );
    assert!(engine
        .registry()
        .find_commands_bound_to(&parse("alt shift F7").unwrap())
        .is_empty());

    profiles[0].open_file_shortcut = "  ".into();
    let report = engine.reconcile(&profiles);
    assert_eq!(report.updated, vec!["zed"]);
    assert!(engine.registry().shortcuts_of("OpenFileInZed").is_empty());
}

#[test]
fn swapping_shortcuts_between_profiles_converges() {
    let mut engine = engine();
    let mut profiles = vec![
        profile("a", "A", "alt shift F1", ""),
        profile("b", "B", "alt shift F2", ""),
    ];
    engine.reconcile(&profiles);

    profiles[0].open_file_shortcut = "alt shift F2".into();
    profiles[1].open_file_shortcut = "alt shift F1".into();
    engine.reconcile(&profiles);

    let registry = engine.registry();
    assert_eq!(
        registry.find_commands_bound_to(&parse("alt shift F2").unwrap()),
        vec!["OpenFileInA".to_string()]
    );
    assert_eq!(
        registry.find_commands_bound_to(&parse("alt shift F1").unwrap()),
        vec!["OpenFileInB".to_string()]
    );
}

#[test]
fn duplicate_ids_are_reported_and_ignored() {
    let mut engine = engine();
    let report = engine.reconcile(&[
        profile("zed", "Zed", "", ""),
        profile("zed", "Other", "", ""),
    ]);

    assert_eq!(report.added, vec!["zed"]);
    assert_eq!(engine.entry("zed").unwrap().display_name, "Zed");
    assert!(report.issues.contains(&ReconcileIssue::DuplicateProfile {
        profile_id: "zed".into()
    }));
}

#[test]
fn profiles_sharing_a_command_id_keep_the_first_ones_shortcut() {
    let mut engine = engine();
    let report = engine.reconcile(&[
        profile("cursor", "Cursor", "ctrl 1", ""),
        profile("Cursor", "Shadow", "ctrl 2", ""),
    ]);

    assert_eq!(report.added, vec!["cursor"]);
    assert!(engine.entry("Cursor").is_none());
    assert!(report.issues.contains(&ReconcileIssue::CommandIdCollision {
        profile_id: "Cursor".into(),
        command_id: "OpenFileInCursor".into(),
        owner: "cursor".into(),
    }));
    assert!(!report
        .issues
        .iter()
        .any(|issue| matches!(issue, ReconcileIssue::RegistryOperationFailed { .. })));

    let registry = engine.registry();
    assert_eq!(
        registry.shortcuts_of("OpenFileInCursor"),
        vec![parse("ctrl 1").unwrap()]
    );
    assert!(registry
        .find_commands_bound_to(&parse("ctrl 2").unwrap())
        .is_empty());
    assert_eq!(
        registry.get_command("OpenFileInCursor").unwrap().text,
        "Open File In Cursor"
    );
}

#[test]
fn vanished_command_is_registered_again() {
    let mut engine = engine();
    let profiles = vec![profile("zed", "Zed", "alt shift F7", "")];
    engine.reconcile(&profiles);

    engine
        .registry_mut()
        .unregister_command("OpenFileInZed")
        .unwrap();
    let report = engine.reconcile(&profiles);

    assert_eq!(report.updated, vec!["zed"]);
    assert!(engine.registry().get_command("OpenFileInZed").is_some());
}

#[test]
fn queued_passes_run_in_submission_order() {
    let queue = ReconcileQueue::start(engine()).unwrap();
    let mut profiles = default_profiles();

    let first = queue.submit(profiles.clone()).unwrap();
    profiles[0].enabled = false;
    let second = queue.submit(profiles.clone()).unwrap();
    profiles[0].enabled = true;
    profiles[0].display_name = "Cursor Nightly".into();
    let third = queue.submit(profiles.clone()).unwrap();

    assert_eq!(first.blocking_recv().unwrap().added.len(), 4);
    assert_eq!(second.blocking_recv().unwrap().removed, vec!["cursor"]);
    assert_eq!(third.blocking_recv().unwrap().added, vec!["cursor"]);

    let engine = queue.shutdown().unwrap();
    let command = engine.registry().get_command("OpenFileInCursor").unwrap();
    assert_eq!(command.text, "Open File In Cursor Nightly");
}
