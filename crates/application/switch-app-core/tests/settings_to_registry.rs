use std::sync::Arc;

use switch_app_core::{ProfileManager, ReconcilerPort};
use switch_core::Profile;
use switch_engine::{InMemoryRegistry, ReconcileQueue, ReconciliationEngine, Registry};
use switch_persistence::FilePersistence;
use tempfile::tempdir;

// --- Helper Functions ---

fn zed() -> Profile {
    Profile {
        id: "zed".into(),
        display_name: "Zed".into(),
        executable_path: "zed".into(),
        open_file_shortcut: "alt shift F1".into(),
        ..Profile::default()
    }
}

// --- Tests ---

#[test]
fn saved_changes_flow_into_the_registry() {
    let dir = tempdir().unwrap();
    let queue = Arc::new(
        ReconcileQueue::start(ReconciliationEngine::new(InMemoryRegistry::with_host_menus()))
            .unwrap(),
    );
    let mgr = ProfileManager::new(FilePersistence::with_root(dir.path()))
        .with_reconciler(queue.clone() as Arc<dyn ReconcilerPort>);

    // The new profile takes cursor's default file shortcut.
    mgr.add(zed()).unwrap();
    mgr.set_enabled("trae", false).unwrap();

    drop(mgr);
    let queue = Arc::into_inner(queue).expect("manager released its reference");
    let engine = queue.shutdown().unwrap();
    let registry = engine.registry();

    assert!(registry.get_command("OpenFileInZed").is_some());
    assert!(registry.get_command("OpenFileInTrae").is_none());
    assert!(registry.shortcuts_of("OpenFileInCursor").is_empty());
    assert_eq!(registry.shortcuts_of("OpenFileInZed").len(), 1);

    let saved = FilePersistence::with_root(dir.path()).load_profiles().unwrap();
    assert_eq!(saved.len(), 5);
}
