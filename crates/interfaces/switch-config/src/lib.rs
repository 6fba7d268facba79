//! Central configuration constants for defaults, menu layout and runtime limits.

use std::time::Duration;

/// Default open-file argument template.
pub const DEFAULT_OPEN_FILE_ARGS: &str = "--goto {file}:{line}:{column}";

/// Default open-project argument template.
pub const DEFAULT_OPEN_PROJECT_ARGS: &str = "{project}";

/// Label of the top-level grouping created inside each host menu.
pub const MENU_GROUP_LABEL: &str = "Switch2Cursor";

/// Label of the file-open sub-grouping.
pub const OPEN_FILE_GROUP_LABEL: &str = "Open File";

/// Label of the project-open sub-grouping.
pub const OPEN_PROJECT_GROUP_LABEL: &str = "Open Project";

/// Host menus that receive a grouping: tools menu, editor context menu, project-tree context menu.
pub const HOST_MENUS: [&str; 3] = ["ToolsMenu", "EditorPopupMenu", "ProjectViewPopupMenu"];

/// Upper bound for a thorough window activation attempt.
pub const ACTIVATION_TIMEOUT: Duration = Duration::from_secs(5);

/// How long the thorough activation child process may run before it is killed.
pub const ACTIVATION_PROCESS_WAIT: Duration = Duration::from_secs(3);

/// Upper bound for the lightweight activation path.
pub const QUICK_ACTIVATION_TIMEOUT: Duration = Duration::from_secs(1);

/// Delay between capturing a shortcut and moving focus off the capture field.
pub const CAPTURE_FOCUS_DELAY: Duration = Duration::from_millis(500);

/// Current version of the persisted settings document.
pub const SETTINGS_VERSION: u32 = 1;

/// `directories::ProjectDirs` identifiers.
pub const CONFIG_QUALIFIER: &str = "com";
pub const CONFIG_ORG: &str = "switch2cursor";
pub const CONFIG_APP: &str = "switch2cursor";

/// Name of the persisted profile document inside the config dir.
pub const PROFILES_FILE: &str = "profiles.json";
