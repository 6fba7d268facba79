use serde::{Deserialize, Serialize};

pub mod capture;
pub mod command;
pub mod defaults;
pub mod keys;
pub mod shortcut;
pub mod template;
pub mod validate;

pub use command::{build, build_open_file, build_open_project, EditorCommand, OpenTarget};
pub use shortcut::{Key, Modifiers, ShortcutSpec};
pub use validate::{validate_set, ConfigError};

pub type ProfileId = String;

fn default_enabled() -> bool {
    true
}

fn default_open_file_args() -> String {
    switch_config::DEFAULT_OPEN_FILE_ARGS.to_string()
}

fn default_open_project_args() -> String {
    switch_config::DEFAULT_OPEN_PROJECT_ARGS.to_string()
}

/// One external editor integration, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub display_name: String,
    pub executable_path: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub open_file_shortcut: String,
    #[serde(default)]
    pub open_project_shortcut: String,
    #[serde(default = "default_open_file_args")]
    pub open_file_args_template: String,
    #[serde(default = "default_open_project_args")]
    pub open_project_args_template: String,
    #[serde(default)]
    pub use_custom_protocol: bool,
    #[serde(default)]
    pub protocol_prefix: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: "New Editor".to_string(),
            executable_path: String::new(),
            enabled: true,
            open_file_shortcut: String::new(),
            open_project_shortcut: String::new(),
            open_file_args_template: default_open_file_args(),
            open_project_args_template: default_open_project_args(),
            use_custom_protocol: false,
            protocol_prefix: String::new(),
        }
    }
}

impl Profile {
    pub fn shortcut_text(&self, kind: ActionKind) -> &str {
        match kind {
            ActionKind::OpenFile => &self.open_file_shortcut,
            ActionKind::OpenProject => &self.open_project_shortcut,
        }
    }

    pub fn args_template(&self, kind: ActionKind) -> &str {
        match kind {
            ActionKind::OpenFile => &self.open_file_args_template,
            ActionKind::OpenProject => &self.open_project_args_template,
        }
    }
}

/// The two commands every enabled profile contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    OpenFile,
    OpenProject,
}

impl ActionKind {
    pub const ALL: [ActionKind; 2] = [ActionKind::OpenFile, ActionKind::OpenProject];

    /// Host command id, e.g. `OpenFileInCursor` for profile `cursor`.
    /// Distinct only for lower-case slug ids, which is all validation admits.
    pub fn command_id(self, profile_id: &str) -> String {
        let prefix = match self {
            ActionKind::OpenFile => "OpenFileIn",
            ActionKind::OpenProject => "OpenProjectIn",
        };
        let mut chars = profile_id.chars();
        match chars.next() {
            Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
            None => prefix.to_string(),
        }
    }

    pub fn display_text(self, display_name: &str) -> String {
        match self {
            ActionKind::OpenFile => format!("Open File In {display_name}"),
            ActionKind::OpenProject => format!("Open Project In {display_name}"),
        }
    }

    pub fn description(self, display_name: &str) -> String {
        match self {
            ActionKind::OpenFile => format!("Open current file in {display_name}"),
            ActionKind::OpenProject => format!("Open current project in {display_name}"),
        }
    }

    /// Label of the sub-grouping this kind is placed under.
    pub fn group_label(self) -> &'static str {
        match self {
            ActionKind::OpenFile => switch_config::OPEN_FILE_GROUP_LABEL,
            ActionKind::OpenProject => switch_config::OPEN_PROJECT_GROUP_LABEL,
        }
    }
}

/// Target operating system family for command construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_ids_capitalise_the_profile_id() {
        assert_eq!(ActionKind::OpenFile.command_id("cursor"), "OpenFileInCursor");
        assert_eq!(
            ActionKind::OpenProject.command_id("trae_cn"),
            "OpenProjectInTrae_cn"
        );
    }

    #[test]
    fn persisted_fields_use_camel_case_and_fill_defaults() {
        let json = r#"{"id":"zed","displayName":"Zed","executablePath":"zed"}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert!(p.enabled);
        assert_eq!(p.open_file_args_template, "--goto {file}:{line}:{column}");
        assert_eq!(p.open_project_args_template, "{project}");
        assert!(p.open_file_shortcut.is_empty());

        let back = serde_json::to_value(&p).unwrap();
        assert!(back.get("openFileArgsTemplate").is_some());
        assert!(back.get("useCustomProtocol").is_some());
    }
}
