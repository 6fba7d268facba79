//! Built-in editor catalogue used for first run and for restoring defaults.

use crate::Profile;

fn preset(id: &str, display_name: &str, executable: &str, slot: u8) -> Profile {
    Profile {
        id: id.to_string(),
        display_name: display_name.to_string(),
        executable_path: executable.to_string(),
        enabled: true,
        open_file_shortcut: format!("alt shift F{slot}"),
        open_project_shortcut: format!("alt shift ctrl F{slot}"),
        ..Profile::default()
    }
}

pub fn default_profiles() -> Vec<Profile> {
    vec![
        Profile {
            protocol_prefix: "cursor://".to_string(),
            ..preset("cursor", "Cursor", "cursor", 1)
        },
        preset("vscode", "VSCode", "code", 2),
        preset("trae", "Trae", "trae", 3),
        preset("trae_cn", "Trae CN", "trae-cn", 4),
    ]
}

pub fn default_for(id: &str) -> Option<Profile> {
    default_profiles().into_iter().find(|p| p.id == id)
}
