//! Invoking an editor from the host: availability, command construction, launch and
//! window activation for both action kinds.

use switch_core::{build, ActionKind, EditorCommand, OpenTarget, Platform, Profile};
use switch_infra::{process_name, ActivationMode};
use tracing::{info, warn};

use crate::ports::{LauncherPort, WindowActivatorPort};

/// What the host knows at the moment an action is invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    pub project_path: Option<String>,
    pub file_path: Option<String>,
    pub file_is_directory: bool,
    /// 1-based caret position, when an editor has focus.
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl ActionContext {
    pub fn for_file(project: &str, file: &str) -> Self {
        Self {
            project_path: Some(project.to_string()),
            file_path: Some(file.to_string()),
            ..Self::default()
        }
    }

    pub fn for_project(project: &str) -> Self {
        Self {
            project_path: Some(project.to_string()),
            ..Self::default()
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Editor \"{0}\" is not configured or is disabled")]
    ProfileUnavailable(String),
    #[error("No {0} to open")]
    MissingContext(&'static str),
    #[error("Could not run {editor}: {reason}. Check that its path is configured correctly and that it is installed")]
    Launch { editor: String, reason: String },
}

/// Whether the action should be enabled in host menus.
pub fn is_available(kind: ActionKind, profile: Option<&Profile>, context: &ActionContext) -> bool {
    let enabled = profile.is_some_and(|p| p.enabled);
    if !enabled || context.project_path.is_none() {
        return false;
    }
    match kind {
        ActionKind::OpenFile => context.file_path.is_some() && !context.file_is_directory,
        ActionKind::OpenProject => true,
    }
}

/// Choices offered by the quick-open chooser.
#[derive(Debug, PartialEq, Eq)]
pub enum QuickPick<'a> {
    NoEnabledEditors,
    Choices(Vec<&'a Profile>),
}

pub fn quick_pick(profiles: &[Profile]) -> QuickPick<'_> {
    let enabled: Vec<&Profile> = profiles.iter().filter(|p| p.enabled).collect();
    if enabled.is_empty() {
        QuickPick::NoEnabledEditors
    } else {
        QuickPick::Choices(enabled)
    }
}

fn usable(profile: Option<&Profile>) -> Result<&Profile, ActionError> {
    match profile {
        Some(p) if p.enabled => Ok(p),
        Some(p) => Err(ActionError::ProfileUnavailable(p.display_name.clone())),
        None => Err(ActionError::ProfileUnavailable("unknown".into())),
    }
}

/// Builds the command an action would run, without running it.
pub fn resolve(
    kind: ActionKind,
    profile: Option<&Profile>,
    context: &ActionContext,
    platform: Platform,
) -> Result<EditorCommand, ActionError> {
    let profile = usable(profile)?;
    let project = context
        .project_path
        .as_deref()
        .ok_or(ActionError::MissingContext("project"))?;

    let target = match kind {
        ActionKind::OpenFile => {
            let path = context
                .file_path
                .as_deref()
                .filter(|_| !context.file_is_directory)
                .ok_or(ActionError::MissingContext("file"))?;
            OpenTarget::File {
                path,
                line: context.line.unwrap_or(1),
                column: context.column.unwrap_or(1),
            }
        }
        ActionKind::OpenProject => OpenTarget::Project { path: project },
    };

    Ok(build(profile, target, platform))
}

pub struct ActionDispatcher<L, W> {
    launcher: L,
    activator: W,
    platform: Platform,
}

impl<L, W> ActionDispatcher<L, W>
where
    L: LauncherPort,
    W: WindowActivatorPort,
{
    pub fn new(launcher: L, activator: W) -> Self {
        Self::with_platform(launcher, activator, Platform::current())
    }

    pub fn with_platform(launcher: L, activator: W, platform: Platform) -> Self {
        Self {
            launcher,
            activator,
            platform,
        }
    }

    pub fn activator(&self) -> &W {
        &self.activator
    }

    /// Runs the action. Activation is scheduled, never awaited; `Quick` is used from
    /// the quick-open chooser.
    pub fn perform(
        &self,
        kind: ActionKind,
        profile: Option<&Profile>,
        context: &ActionContext,
        mode: ActivationMode,
    ) -> Result<EditorCommand, ActionError> {
        let command = resolve(kind, profile, context, self.platform)?;
        let profile = usable(profile)?;

        if let Err(e) = self.launcher.launch(&command) {
            warn!("Failed to launch {}: {e:#}", profile.display_name);
            return Err(ActionError::Launch {
                editor: profile.display_name.clone(),
                reason: format!("{e:#}"),
            });
        }
        info!("Opened {:?} in {}", kind, profile.display_name);

        self.activator
            .activate(&process_name(&profile.executable_path), mode);
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    impl LauncherPort for RecordingLauncher {
        fn launch(&self, command: &EditorCommand) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("No such file or directory");
            }
            self.launched.lock().unwrap().push(command.argv().to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingActivator {
        calls: Mutex<Vec<(String, ActivationMode)>>,
    }

    impl WindowActivatorPort for RecordingActivator {
        fn activate(&self, process_name: &str, mode: ActivationMode) {
            self.calls
                .lock()
                .unwrap()
                .push((process_name.to_string(), mode));
        }
    }

    fn cursor() -> Profile {
        Profile {
            id: "cursor".into(),
            display_name: "Cursor".into(),
            executable_path: "cursor".into(),
            ..Profile::default()
        }
    }

    fn dispatcher() -> ActionDispatcher<RecordingLauncher, RecordingActivator> {
        ActionDispatcher::with_platform(
            RecordingLauncher::default(),
            RecordingActivator::default(),
            Platform::Other,
        )
    }

    #[test]
    fn open_file_requires_a_real_file_and_enabled_profile() {
        let profile = cursor();
        let ctx = ActionContext::for_file("/p", "/p/a.rs");
        assert!(is_available(ActionKind::OpenFile, Some(&profile), &ctx));

        let dir = ActionContext {
            file_is_directory: true,
            ..ctx.clone()
        };
        assert!(!is_available(ActionKind::OpenFile, Some(&profile), &dir));
        assert!(is_available(ActionKind::OpenProject, Some(&profile), &dir));

        let disabled = Profile {
            enabled: false,
            ..cursor()
        };
        assert!(!is_available(ActionKind::OpenFile, Some(&disabled), &ctx));
        assert!(!is_available(ActionKind::OpenProject, None, &ctx));
        assert!(!is_available(
            ActionKind::OpenProject,
            Some(&profile),
            &ActionContext::default()
        ));
    }

    #[test]
    fn caret_defaults_to_first_line_and_column() {
        let d = dispatcher();
        let cmd = d
            .perform(
                ActionKind::OpenFile,
                Some(&cursor()),
                &ActionContext::for_file("/p", "/p/a.rs"),
                ActivationMode::Thorough,
            )
            .unwrap();
        assert_eq!(cmd.argv(), ["cursor", "--goto", "/p/a.rs:1:1"]);
        assert_eq!(
            d.activator.calls.lock().unwrap().as_slice(),
            [("cursor".to_string(), ActivationMode::Thorough)]
        );
    }

    #[test]
    fn quick_mode_is_forwarded_to_activation() {
        let d = dispatcher();
        d.perform(
            ActionKind::OpenProject,
            Some(&cursor()),
            &ActionContext::for_project("/work/app"),
            ActivationMode::Quick,
        )
        .unwrap();
        assert_eq!(
            d.launcher.launched.lock().unwrap()[0],
            vec!["cursor".to_string(), "/work/app".to_string()]
        );
        assert_eq!(d.activator.calls.lock().unwrap()[0].1, ActivationMode::Quick);
    }

    #[test]
    fn launch_failure_is_reported_and_skips_activation() {
        let d = ActionDispatcher::with_platform(
            RecordingLauncher {
                fail: true,
                ..Default::default()
            },
            RecordingActivator::default(),
            Platform::Other,
        );
        let err = d
            .perform(
                ActionKind::OpenFile,
                Some(&cursor()),
                &ActionContext::for_file("/p", "/p/a.rs").at(3, 7),
                ActivationMode::Thorough,
            )
            .unwrap_err();
        assert!(matches!(err, ActionError::Launch { ref editor, .. } if editor == "Cursor"));
        assert!(err.to_string().contains("No such file"));
        assert!(d.activator.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn unavailable_profile_and_missing_context_are_errors() {
        let d = dispatcher();
        let disabled = Profile {
            enabled: false,
            ..cursor()
        };
        assert!(matches!(
            d.perform(
                ActionKind::OpenProject,
                Some(&disabled),
                &ActionContext::for_project("/p"),
                ActivationMode::Thorough
            ),
            Err(ActionError::ProfileUnavailable(_))
        ));
        assert!(matches!(
            d.perform(
                ActionKind::OpenFile,
                Some(&cursor()),
                &ActionContext::for_project("/p"),
                ActivationMode::Thorough
            ),
            Err(ActionError::MissingContext("file"))
        ));
        assert!(d.launcher.launched.lock().unwrap().is_empty());
    }

    #[test]
    fn quick_pick_lists_enabled_profiles_in_order() {
        let mut profiles = switch_core::defaults::default_profiles();
        profiles[0].enabled = false;
        match quick_pick(&profiles) {
            QuickPick::Choices(choices) => {
                let ids: Vec<_> = choices.iter().map(|p| p.id.as_str()).collect();
                assert_eq!(ids, ["vscode", "trae", "trae_cn"]);
            }
            QuickPick::NoEnabledEditors => panic!("expected choices"),
        }

        for p in &mut profiles {
            p.enabled = false;
        }
        assert_eq!(quick_pick(&profiles), QuickPick::NoEnabledEditors);
    }
}
